use crate::coordinator::ViewSink;
use crate::models::{GitHubProfile, NavLink, Project, YearGroup};
use crate::site::theme::ThemeOption;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewMessage<'a> {
    Render {
        title: &'a str,
        projects: &'a [Project],
    },
    Chart {
        groups: &'a [YearGroup],
        selected: Option<usize>,
    },
    Nav {
        links: &'a [NavLink],
    },
    Theme {
        scheme: &'a str,
        options: &'a [ThemeOption],
    },
    Navigate {
        url: &'a str,
    },
    Profile {
        profile: &'a GitHubProfile,
    },
    Error {
        message: &'a str,
    },
}

/// Writes every view update as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    closed: bool,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, closed: false }
    }

    /// True once the reader has gone away; nothing more will be written.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn send(&mut self, message: &ViewMessage<'_>) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        let result = serde_json::to_writer(&mut self.writer, message)
            .map_err(io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"))
            .and_then(|_| self.writer.flush());
        if let Err(error) = &result {
            if error.kind() == io::ErrorKind::BrokenPipe {
                tracing::info!("view output closed");
                self.closed = true;
            }
        }
        result
    }

    fn send_or_log(&mut self, message: &ViewMessage<'_>) {
        if let Err(error) = self.send(message) {
            if !self.closed {
                tracing::warn!(error = %error, "failed to write view update");
            }
        }
    }
}

impl<W: Write> ViewSink for JsonLinesSink<W> {
    fn render(&mut self, visible: &[Project], title: &str) {
        self.send_or_log(&ViewMessage::Render {
            title,
            projects: visible,
        });
    }

    fn draw_chart(&mut self, groups: &[YearGroup], selected: Option<usize>) {
        self.send_or_log(&ViewMessage::Chart { groups, selected });
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonLinesSink, ViewMessage};
    use crate::coordinator::ViewSink;
    use crate::models::{Project, YearGroup};
    use std::io::{self, Write};

    struct ClosedPipe {
        writes: usize,
    }

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(sink: JsonLinesSink<Vec<u8>>) -> Vec<serde_json::Value> {
        String::from_utf8(sink.into_inner())
            .expect("utf8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect()
    }

    #[test]
    fn writes_render_and_chart_lines() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.render(&[Project::new("Alpha", "demo", 2020)], "Projects (1)");
        sink.draw_chart(&[YearGroup { year: 2020, count: 1 }], Some(0));

        let lines = lines(sink);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "render");
        assert_eq!(lines[0]["title"], "Projects (1)");
        assert_eq!(lines[0]["projects"][0]["year"], 2020);
        assert_eq!(lines[1]["type"], "chart");
        assert_eq!(lines[1]["groups"][0]["count"], 1);
        assert_eq!(lines[1]["selected"], 0);
    }

    #[test]
    fn unselected_chart_serializes_null() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.draw_chart(&[], None);
        sink.send(&ViewMessage::Error { message: "unknown command" }).expect("send");

        let lines = lines(sink);
        assert!(lines[0]["selected"].is_null());
        assert_eq!(lines[1]["message"], "unknown command");
    }

    #[test]
    fn broken_pipe_closes_sink_and_stops_writing() {
        let mut sink = JsonLinesSink::new(ClosedPipe { writes: 0 });
        let error = sink
            .send(&ViewMessage::Error { message: "first" })
            .expect_err("pipe is closed");
        assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
        assert!(sink.is_closed());

        let writes = sink.writer.writes;
        sink.render(&[], "Projects (0)");
        assert!(sink.send(&ViewMessage::Error { message: "second" }).is_err());
        assert_eq!(sink.writer.writes, writes);
    }

    #[test]
    fn open_sink_reports_success() {
        let mut sink = JsonLinesSink::new(Vec::new());
        assert!(sink.send(&ViewMessage::Navigate { url: "mailto:me@example.com?" }).is_ok());
        assert!(!sink.is_closed());
    }
}
