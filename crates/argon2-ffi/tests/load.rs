use std::path::PathBuf;
use std::sync::Arc;

use argon2_fetch::ReqwestClient;
use argon2_ffi::provision::{LIBRARY_NAME, ProvisionConfig, ProvisionError, Provisioner};
use argon2_ffi::testing::{EncodedHashPattern, assert_argon2_encoded};
use argon2_ffi::{Argon2, CallChannel, ExtraData, HashOptions};
use argon2_platform::Target;

/// Directory holding the `argon2-native` cdylib cargo built for this test.
fn build_dir() -> PathBuf {
    let file = Target::current().unwrap().os().dylib_file_name(LIBRARY_NAME);
    let exe = std::env::current_exe().unwrap();
    exe.ancestors()
        .skip(1)
        .take(2)
        .find(|dir| dir.join(&file).is_file())
        .unwrap_or_else(|| panic!("{file} not found next to {}", exe.display()))
        .to_path_buf()
}

fn provisioner() -> Provisioner<ReqwestClient> {
    Provisioner::new(ReqwestClient::new(), ProvisionConfig::local(Some(build_dir())))
}

#[tokio::test]
async fn test_loads_local_build_once() {
    let provisioner = provisioner();
    let first = provisioner.acquire().await.unwrap();
    let second = provisioner.acquire().await.unwrap();

    let debug = format!("{first:?}");
    assert!(debug.contains("dynamic: true"), "{debug}");
    assert_eq!(debug, format!("{second:?}"));
    assert!(provisioner.is_initialized());
}

#[tokio::test]
async fn test_round_trip_through_loaded_library() {
    let argon2 = Argon2::new(provisioner().acquire().await.unwrap());

    let hash = argon2.hash("test", &HashOptions::default()).await.unwrap();
    assert!(hash.starts_with("$argon2i$v=16$m=4096,t=3,p=1$"), "{hash}");
    assert_argon2_encoded(&hash, &EncodedHashPattern::default());

    assert!(argon2.verify(&hash, "test", None, &ExtraData::None).await.unwrap());
    assert!(!argon2.verify(&hash, "Test", None, &ExtraData::None).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_channel_outlives_provisioner() {
    let channel = provisioner().acquire().await.unwrap();

    let tasks: Vec<_> = (0..4)
        .map(|i| {
            let argon2 = Argon2::new(channel.clone());
            tokio::spawn(async move {
                let password = format!("password-{i}");
                let hash = argon2.hash(&password, &HashOptions::default()).await.unwrap();
                argon2.verify(&hash, &password, None, &ExtraData::None).await.unwrap()
            })
        })
        .collect();
    drop(channel);

    for task in tasks {
        assert!(task.await.unwrap());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_acquire_loads_once() {
    let provisioner = Arc::new(provisioner());

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let provisioner = provisioner.clone();
            tokio::spawn(async move { provisioner.acquire().await.map(|c| format!("{c:?}")) })
        })
        .collect();

    let mut handles = Vec::new();
    for task in tasks {
        handles.push(task.await.unwrap().unwrap());
    }
    assert!(handles.windows(2).all(|pair| pair[0] == pair[1]));
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
#[test]
fn test_library_without_entry_points() {
    let err = CallChannel::load(std::path::Path::new("libm.so.6")).unwrap_err();
    assert!(
        matches!(err, ProvisionError::MissingSymbol { name: "hash", .. }),
        "{err}"
    );
}

#[test]
fn test_unloadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not-a-library");
    std::fs::write(&path, b"plain text").unwrap();

    let err = CallChannel::load(&path).unwrap_err();
    assert!(matches!(err, ProvisionError::Load { path: ref p, .. } if *p == path), "{err}");
}
