use crate::list::BulletMarker;

/// Conversion settings.
///
/// The default converts without rewrapping paragraphs, accepts the lenient
/// task marker forms and writes `-` in front of bullet items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Column to rewrap paragraphs at when converting back to markdown.
    pub max_width: Option<usize>,
    /// Which task marker forms turn a bullet item into a task item.
    pub task_markers: TaskMarkers,
    /// Marker written in front of bullet items.
    pub bullet: BulletMarker,
}

/// Accepted task marker forms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskMarkers {
    /// Only `[ ]`, `[x]` and `[X]` followed by whitespace.
    Strict,
    /// Also the bare `[]` form and a marker with no text after it.
    #[default]
    Lenient,
}

impl Config {
    /// Internal setter for config options. Used for testing
    #[cfg(test)]
    pub(crate) fn set(&mut self, field: &str, value: &str) {
        match field {
            "max_width" => {
                let value = value.parse::<usize>().unwrap();
                self.max_width = Some(value)
            }
            "task_markers" => {
                self.task_markers = match value {
                    "strict" => TaskMarkers::Strict,
                    "lenient" => TaskMarkers::Lenient,
                    _ => panic!("unknown task marker mode {value}"),
                }
            }
            "bullet" => self.bullet = value.parse().unwrap(),
            _ => panic!("unknown configuration {field}"),
        }
    }
}
