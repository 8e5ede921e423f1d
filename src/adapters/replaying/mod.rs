//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_provider;

use serde::de::DeserializeOwned;

use crate::ports::GalleryError;

/// Turn a recorded `{Ok: ..}` / `{Err: ..}` output back into a result.
///
/// Plain string errors (older recordings) and malformed outputs become
/// [`GalleryError::Unknown`].
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, GalleryError> {
    if let Some(err) = output.get("Err").or_else(|| output.get("err")) {
        if let Some(message) = err.as_str() {
            return Err(GalleryError::Unknown(message.to_string()));
        }
        return Err(serde_json::from_value(err.clone()).unwrap_or_else(|e| {
            GalleryError::Unknown(format!("unreadable recorded error: {e}"))
        }));
    }

    let ok = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(ok)
        .map_err(|e| GalleryError::Unknown(format!("unreadable recorded output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Image;
    use serde_json::json;

    #[test]
    fn structured_error_is_restored() {
        let result = replay_result::<Image>(json!({"Err": {"kind": "not_found"}}));
        assert_eq!(result, Err(GalleryError::NotFound));
    }

    #[test]
    fn string_error_becomes_unknown() {
        let result = replay_result::<Image>(json!({"Err": "disk unplugged"}));
        assert_eq!(result, Err(GalleryError::Unknown("disk unplugged".into())));
    }

    #[test]
    fn ok_image_is_restored() {
        let result = replay_result::<Image>(json!({"Ok": {"data": "AQID", "mime_type": "image/png"}}));
        assert_eq!(result, Ok(Image::new(vec![1, 2, 3], "image/png")));
    }

    #[test]
    fn garbage_is_unknown() {
        assert!(matches!(
            replay_result::<Image>(json!({"Ok": 42})),
            Err(GalleryError::Unknown(_))
        ));
    }
}
