// THEORY:
// The `display` module is the last hop of the pipeline: it hands an encoded PNG
// to a notebook front end. Notebook kernels publish rich output as MIME bundles,
// so an image becomes `{"image/png": <base64>}` on a `display_data` message,
// optionally preceded by a `clear_output` so an animation redraws in place.
//
// The kernel side is abstracted as a `DisplayChannel`. Publishing is
// fire-and-forget: the renderer has no use for the result, so failures are
// logged by the channel and never returned.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use log::warn;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

pub const PNG_MIME: &str = "image/png";

/// One message published to a notebook front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "msg_type", rename_all = "snake_case")]
pub enum DisplayEvent {
    ClearOutput {
        wait: bool,
    },
    DisplayData {
        data: Map<String, Value>,
        metadata: Map<String, Value>,
        transient: Map<String, Value>,
    },
}

/// Where display events go.
pub trait DisplayChannel {
    fn publish(&mut self, event: DisplayEvent);
}

/// Builds the MIME bundle for a PNG byte stream.
pub fn png_bundle(png: &[u8]) -> Map<String, Value> {
    let mut bundle = Map::new();
    bundle.insert(PNG_MIME.to_string(), Value::String(STANDARD.encode(png)));
    bundle
}

/// Shows a PNG in the notebook, clearing the previous output first if asked.
pub fn display_image<C: DisplayChannel + ?Sized>(channel: &mut C, png: &[u8], clear_output: bool) {
    if clear_output {
        channel.publish(DisplayEvent::ClearOutput { wait: true });
    }
    channel.publish(DisplayEvent::DisplayData {
        data: png_bundle(png),
        metadata: Map::new(),
        transient: Map::new(),
    });
}

/// Writes each event as one line of JSON, e.g. to a kernel's stdout pipe.
pub struct JsonLinesDisplay<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplayChannel for JsonLinesDisplay<W> {
    fn publish(&mut self, event: DisplayEvent) {
        let written = serde_json::to_writer(&mut self.writer, &event)
            .map_err(std::io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush());
        if let Err(err) = written {
            warn!("dropping display event: {err}");
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub events: Vec<DisplayEvent>,
}

impl DisplayChannel for RecordingDisplay {
    fn publish(&mut self, event: DisplayEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_holds_base64_png() {
        let bundle = png_bundle(b"\x89PNG");
        assert_eq!(bundle.get(PNG_MIME), Some(&Value::String("iVBORw==".to_string())));
    }

    #[test]
    fn clear_flag_sends_clear_first() {
        let mut display = RecordingDisplay::default();
        display_image(&mut display, b"abc", true);
        assert_eq!(display.events.len(), 2);
        assert_eq!(display.events[0], DisplayEvent::ClearOutput { wait: true });
        match &display.events[1] {
            DisplayEvent::DisplayData { data, .. } => {
                assert_eq!(data[PNG_MIME], Value::String("YWJj".to_string()));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn no_clear_without_flag() {
        let mut display = RecordingDisplay::default();
        display_image(&mut display, b"abc", false);
        assert_eq!(display.events.len(), 1);
        assert!(matches!(display.events[0], DisplayEvent::DisplayData { .. }));
    }

    #[test]
    fn json_lines_output() {
        let mut display = JsonLinesDisplay::new(Vec::new());
        display_image(&mut display, b"abc", true);
        let out = String::from_utf8(display.into_inner()).unwrap();
        let lines: Vec<Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["msg_type"], "clear_output");
        assert_eq!(lines[0]["wait"], true);
        assert_eq!(lines[1]["msg_type"], "display_data");
        assert_eq!(lines[1]["data"]["image/png"], "YWJj");
    }
}
