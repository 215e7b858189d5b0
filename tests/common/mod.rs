//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::io::Cursor;
use std::net::SocketAddr;
use std::time::Duration;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use image_compressor::config::ServiceConfig;
use image_compressor::http::HttpServer;
use image_compressor::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A server running on an ephemeral port. Stops when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service with `config` on 127.0.0.1:0.
pub async fn start_server(config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let signalled = shutdown.signalled();
    tokio::spawn(async move {
        let _ = server.run(listener, signalled).await;
    });

    // Wait until the listener answers.
    let client = client();
    for _ in 0..50 {
        if client.get(format!("http://{}/", addr)).send().await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    TestServer { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// A 96x64 image with gradients and fine detail, so quality changes show up
/// in the encoded size.
pub fn sample_image() -> RgbImage {
    RgbImage::from_fn(96, 64, |x, y| {
        let noise = (x.wrapping_mul(7919) ^ y.wrapping_mul(104_729)) % 64;
        Rgb([
            (x * 255 / 95) as u8,
            (y * 255 / 63) as u8,
            (noise * 4) as u8,
        ])
    })
}

/// `sample_image` encoded as `format`.
pub fn encode_sample(format: ImageFormat) -> Vec<u8> {
    let rgb = sample_image();
    let mut out = Cursor::new(Vec::new());

    if format == ImageFormat::Gif {
        let rgba = DynamicImage::ImageRgb8(rgb).to_rgba8();
        {
            let mut encoder = image::codecs::gif::GifEncoder::new(&mut out);
            encoder.encode_frame(image::Frame::new(rgba)).unwrap();
        }
        return out.into_inner();
    }

    DynamicImage::ImageRgb8(rgb).write_to(&mut out, format).unwrap();
    out.into_inner()
}

/// Multipart form with one file part named `field`.
pub fn file_form(field: &str, file_name: &str, data: Vec<u8>) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new().part(
        field.to_string(),
        reqwest::multipart::Part::bytes(data).file_name(file_name.to_string()),
    )
}

pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFF, 0xD8]) && bytes.ends_with(&[0xFF, 0xD9])
}
