use tracing::warn;

/// Destination for copied values.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

/// Platform clipboard. The handle is opened lazily and then kept alive, since
/// some platforms drop the contents together with the owning handle.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        if self.handle.is_none() {
            self.handle = Some(arboard::Clipboard::new().map_err(|err| err.to_string())?);
        }
        match self.handle.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_owned())
                .map_err(|err| err.to_string()),
            None => Err("clipboard unavailable".into()),
        }
    }
}

/// Writes the untruncated `value`. Failures are logged and reported only
/// through the return value.
pub fn copy(sink: &mut dyn ClipboardSink, value: &str) -> bool {
    match sink.write_text(value) {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, len = value.len(), "clipboard write failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::display_truncate;

    #[derive(Default)]
    struct RecordingClipboard {
        contents: Option<String>,
        fail: bool,
    }

    impl ClipboardSink for RecordingClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), String> {
            if self.fail {
                return Err("no display".into());
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn copy_writes_the_full_value() {
        let value = "9".repeat(500);
        assert_ne!(display_truncate(&value, 40), value);

        let mut clipboard = RecordingClipboard::default();
        assert!(copy(&mut clipboard, &value));
        assert_eq!(clipboard.contents.as_deref(), Some(value.as_str()));
    }

    #[test]
    fn copy_failure_is_reported_not_raised() {
        let mut clipboard = RecordingClipboard {
            fail: true,
            ..Default::default()
        };
        assert!(!copy(&mut clipboard, "12345678910987654321"));
        assert!(clipboard.contents.is_none());
    }
}
