use argon2_ffi::testing::{EncodedHashPattern, assert_argon2_encoded};
use argon2_ffi::{
    Argon2, CallChannel, ErrorKind, ExtraData, HashOptions, Symbols, ThreadMode, Variant, Version,
};

fn argon2() -> Argon2 {
    let symbols = unsafe {
        Symbols::new(
            argon2_native::hash,
            argon2_native::verify,
            argon2_native::free_buf,
        )
    };
    Argon2::new(CallChannel::from_symbols(symbols))
}

#[tokio::test]
async fn test_default_hash() {
    let argon2 = argon2();
    let hash = argon2.hash("test", &HashOptions::default()).await.unwrap();

    assert!(hash.starts_with("$argon2i$v=16$m=4096,t=3,p=1$"), "{hash}");
    assert_argon2_encoded(&hash, &EncodedHashPattern::default());
    assert!(argon2.verify(&hash, "test", None, &ExtraData::None).await.unwrap());
    assert!(!argon2.verify(&hash, "Test", None, &ExtraData::None).await.unwrap());
}

#[tokio::test]
async fn test_generated_salts_differ() {
    let argon2 = argon2();
    let first = argon2.hash("test", &HashOptions::default()).await.unwrap();
    let second = argon2.hash("test", &HashOptions::default()).await.unwrap();

    assert_ne!(first, second);
    assert!(argon2.verify(&first, "test", None, &ExtraData::None).await.unwrap());
    assert!(argon2.verify(&second, "test", None, &ExtraData::None).await.unwrap());
}

#[tokio::test]
async fn test_full_options() {
    let argon2 = argon2();
    let data = ExtraData::json(&serde_json::json!({
        "hashedAt": 1_700_000_000_000u64,
        "requestId": "a00d22c0-4681-4351-8c8f-6f02a42dd941",
    }))
    .unwrap();
    let options = HashOptions::default()
        .salt(*b"deterministic-salt")
        .secret(b"my-super-secret".to_vec())
        .data(data.clone())
        .variant(Variant::Argon2id)
        .version(Version::V0x13)
        .memory_cost(8192)
        .time_cost(10)
        .lanes(4)
        .hash_length(16)
        .thread_mode(ThreadMode::Parallel);

    let hash = argon2.hash("test", &options).await.unwrap();
    assert_argon2_encoded(
        &hash,
        &EncodedHashPattern {
            variant:     Some(Variant::Argon2id),
            version:     Some(Version::V0x13),
            memory_cost: Some(8192),
            time_cost:   Some(10),
            lanes:       Some(4),
        },
    );

    let secret = Some(&b"my-super-secret"[..]);
    assert!(argon2.verify(&hash, "test", secret, &data).await.unwrap());
    assert!(!argon2.verify(&hash, "test", None, &data).await.unwrap());
    assert!(!argon2.verify(&hash, "test", secret, &ExtraData::None).await.unwrap());
    assert!(!argon2.verify(&hash, "test", Some(&b"other-secret"[..]), &data).await.unwrap());
}

#[tokio::test]
async fn test_fixed_salt_is_deterministic() {
    let argon2 = argon2();
    let options = HashOptions::default().salt(vec![42; 16]);
    let first = argon2.hash("password", &options).await.unwrap();
    let second = argon2.hash("password", &options).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_mutated_password_fails_verification() {
    let argon2 = argon2();
    let password = "correct horse battery staple";
    let hash = argon2.hash(password, &HashOptions::default()).await.unwrap();

    for i in 0..password.len() {
        let mut bytes = password.as_bytes().to_vec();
        bytes[i] ^= 0x01;
        let mutated = String::from_utf8(bytes).unwrap();
        assert!(!argon2.verify(&hash, &mutated, None, &ExtraData::None).await.unwrap());
    }
}

#[tokio::test]
async fn test_short_salt_is_invalid_input() {
    let err = argon2()
        .hash("test", &HashOptions::default().salt(vec![1; 4]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.message(), "Input salt is too short: 4");
}

#[tokio::test]
async fn test_long_salt_is_native_error() {
    let argon2 = argon2();
    let longest = HashOptions::default().salt(vec![7; 48]);
    let hash = argon2.hash("test", &longest).await.unwrap();
    assert!(argon2.verify(&hash, "test", None, &ExtraData::None).await.unwrap());

    let err = argon2
        .hash("test", &HashOptions::default().salt(vec![7; 64]))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Native);
    assert_eq!(err.native_diagnostic(), Some("salt too long: 64 bytes (max 48)"));
}

#[tokio::test]
async fn test_data_is_appended_to_password() {
    let argon2 = argon2();
    let data = ExtraData::from(b"x".to_vec());
    let hash = argon2
        .hash("pw", &HashOptions::default().data(data.clone()))
        .await
        .unwrap();

    assert!(argon2.verify(&hash, "pw", None, &data).await.unwrap());
    assert!(argon2.verify(&hash, "pwx", None, &ExtraData::None).await.unwrap());
    assert!(!argon2.verify(&hash, "pw", None, &ExtraData::None).await.unwrap());
}

#[tokio::test]
async fn test_malformed_hash_is_native_error() {
    let err = argon2()
        .verify("not an argon2 hash", "test", None, &ExtraData::None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Native);
    assert!(err.native_diagnostic().is_some());
    assert!(err.message().starts_with("An error occurred executing `verify`"));
}

#[tokio::test]
async fn test_backend_rejection_carries_diagnostic() {
    let err = argon2()
        .hash("test", &HashOptions::default().memory_cost(1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Native);

    let diagnostic = err.native_diagnostic().unwrap().to_string();
    assert!(!diagnostic.is_empty());
    assert!(err.message().ends_with(&diagnostic));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_calls_are_independent() {
    let argon2 = argon2();
    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let argon2 = argon2.clone();
            tokio::spawn(async move {
                let password = format!("password-{i}");
                let hash = argon2.hash(&password, &HashOptions::default()).await.unwrap();
                (password, hash)
            })
        })
        .collect();

    for task in tasks {
        let (password, hash) = task.await.unwrap();
        assert!(argon2.verify(&hash, &password, None, &ExtraData::None).await.unwrap());
        assert!(!argon2.verify(&hash, "password-x", None, &ExtraData::None).await.unwrap());
    }
}
