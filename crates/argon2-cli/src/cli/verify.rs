use argon2_ffi::ExtraData;

use super::input;

#[derive(Debug, clap::Args)]
pub struct Verify {
    /// Encoded hash to check against
    #[arg(short = 'H', long)]
    hash: String,

    #[arg(short = 'S', long)]
    secret: Option<String>,
}

impl Verify {
    pub async fn run(self) -> anyhow::Result<()> {
        let password = input::read_password()?;
        let secret = self.secret.as_deref().map(str::as_bytes);

        let valid = argon2_ffi::verify(&self.hash, &password, secret, &ExtraData::None).await?;
        println!("{valid}");
        Ok(())
    }
}
