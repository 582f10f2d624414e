use anyhow::Result;

use crate::{keys, Store};

impl Store {
    /// The payment destination shown to members: a UPI deep link or
    /// an uploaded data URL. Empty when never configured.
    pub async fn qr_code(&self) -> String {
        self.load(keys::QR_CODE).await
    }

    pub async fn set_qr_code(&self, url: &str) -> Result<()> {
        self.save(keys::QR_CODE, &url.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_qr_code_roundtrip() {
        let store = Store::open_test();
        assert_eq!(store.qr_code().await, "");

        store
            .set_qr_code("upi://pay?pa=club@bank&pn=Clubhouse")
            .await
            .unwrap();
        assert_eq!(store.qr_code().await, "upi://pay?pa=club@bank&pn=Clubhouse");
    }
}
