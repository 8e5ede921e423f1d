//! Live adapter that downloads the image from a URL.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::AppError;
use crate::ports::image_provider::{GalleryError, Image, ImageFuture, ImageProvider};

/// Fetches the image with a plain `GET` on every request.
pub struct RemoteImageProvider {
    client: Client,
    url: String,
}

impl RemoteImageProvider {
    /// Create a provider for `url` whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: url.into() })
    }
}

impl ImageProvider for RemoteImageProvider {
    fn request_image(&self) -> ImageFuture<'_> {
        Box::pin(async move {
            let response = self.client.get(&self.url).send().await.map_err(|e| {
                GalleryError::Unknown(format!("request to {} failed: {e}", self.url))
            })?;

            if let Some(err) = classify_status(response.status()) {
                return Err(err);
            }

            let body = response.bytes().await.map_err(|e| {
                GalleryError::Unknown(format!("reading body from {} failed: {e}", self.url))
            })?;
            image_from_body(body.to_vec())
        })
    }
}

/// Map an HTTP status to the failure it represents, if any.
fn classify_status(status: StatusCode) -> Option<GalleryError> {
    match status {
        s if s.is_success() => None,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Some(GalleryError::PermissionDenied),
        StatusCode::NOT_FOUND | StatusCode::GONE => Some(GalleryError::NotFound),
        other => Some(GalleryError::Unknown(format!("server answered {other}"))),
    }
}

fn image_from_body(data: Vec<u8>) -> Result<Image, GalleryError> {
    let format = image::guess_format(&data)
        .map_err(|e| GalleryError::Unknown(format!("response is not an image: {e}")))?;
    Ok(Image::new(data, format.to_mime_type()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0_u8; 1024];
            let _ = socket.read(&mut request).await;
            let head = format!(
                "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/avatar")
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(2, 2);
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn statuses_are_classified() {
        assert_eq!(classify_status(StatusCode::OK), None);
        assert_eq!(classify_status(StatusCode::FORBIDDEN), Some(GalleryError::PermissionDenied));
        assert_eq!(classify_status(StatusCode::UNAUTHORIZED), Some(GalleryError::PermissionDenied));
        assert_eq!(classify_status(StatusCode::NOT_FOUND), Some(GalleryError::NotFound));
        assert_eq!(classify_status(StatusCode::GONE), Some(GalleryError::NotFound));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR),
            Some(GalleryError::Unknown(detail)) if detail.contains("500")
        ));
    }

    #[test]
    fn non_image_body_is_unknown() {
        assert!(matches!(
            image_from_body(b"<html>hello</html>".to_vec()),
            Err(GalleryError::Unknown(_))
        ));
    }

    #[tokio::test]
    async fn downloads_image_and_detects_mime_type() {
        let png = png_bytes();
        let url = serve_once("200 OK", png.clone()).await;
        let provider = RemoteImageProvider::new(url, Duration::from_secs(5)).unwrap();

        let image = provider.request_image().await.unwrap();
        assert_eq!(image.data, png);
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn forbidden_is_permission_denied() {
        let url = serve_once("403 Forbidden", Vec::new()).await;
        let provider = RemoteImageProvider::new(url, Duration::from_secs(5)).unwrap();

        assert_eq!(provider.request_image().await.unwrap_err(), GalleryError::PermissionDenied);
    }

    #[tokio::test]
    async fn unreachable_host_is_unknown() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider =
            RemoteImageProvider::new(format!("http://{addr}/"), Duration::from_secs(5)).unwrap();
        assert!(matches!(provider.request_image().await, Err(GalleryError::Unknown(_))));
    }
}
