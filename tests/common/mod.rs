#![allow(dead_code)]

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Everything a reader produced, plus the error that ended it (if any).
pub struct Drained {
    pub bytes: Vec<u8>,
    pub error: Option<io::Error>,
}

impl Drained {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Read until EOF or the first error, keeping what arrived before it.
pub async fn drain<R: AsyncRead + Unpin>(reader: &mut R) -> Drained {
    let mut bytes = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => return Drained { bytes, error: None },
            Ok(n) => bytes.extend_from_slice(&chunk[..n]),
            Err(err) => {
                return Drained {
                    bytes,
                    error: Some(err),
                };
            }
        }
    }
}
