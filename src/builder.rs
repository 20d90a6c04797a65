use super::*;

/// Builder for a [`Converter`].
///
/// ```rust
/// # use marknext_markdown::{BulletMarker, ConverterBuilder};
/// let mut builder = ConverterBuilder::default();
/// builder.max_width(Some(80)).bullet_marker(BulletMarker::Asterisk);
/// let converter = builder.build();
/// assert_eq!(converter.config().max_width, Some(80));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConverterBuilder {
    config: Config,
}

impl ConverterBuilder {
    /// Start from an existing [`Config`].
    ///
    /// ```rust
    /// # use marknext_markdown::{Config, ConverterBuilder, TaskMarkers};
    /// let config = Config {
    ///     task_markers: TaskMarkers::Strict,
    ///     ..Default::default()
    /// };
    /// let mut builder = ConverterBuilder::with_config(config);
    /// builder.max_width(Some(72));
    /// let converter = builder.build();
    /// assert_eq!(converter.config().task_markers, TaskMarkers::Strict);
    /// assert_eq!(converter.config().max_width, Some(72));
    /// ```
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Configure the max width when writing paragraphs back out.
    ///
    /// When set to [None], the default, paragraphs are not rewrapped.
    pub fn max_width(&mut self, max_width: Option<usize>) -> &mut Self {
        self.config.max_width = max_width;
        self
    }

    /// Only accept `[ ]`, `[x]` and `[X]` followed by whitespace as task markers.
    pub fn strict_task_markers(&mut self, strict: bool) -> &mut Self {
        self.config.task_markers = if strict {
            TaskMarkers::Strict
        } else {
            TaskMarkers::Lenient
        };
        self
    }

    /// Marker written in front of bullet items.
    pub fn bullet_marker(&mut self, bullet: BulletMarker) -> &mut Self {
        self.config.bullet = bullet;
        self
    }

    /// Create the [`Converter`].
    pub fn build(self) -> Converter {
        Converter {
            config: self.config,
        }
    }
}

/// Converts between markdown, parsed documents and rendered trees.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    config: Config,
}

impl Converter {
    /// Create a [`Converter`] with a custom [`Config`].
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// The settings in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse markdown into a [`Document`].
    pub fn parse(&self, input: &str) -> Document {
        let input = parser::normalize(input);
        let document = BlockParser::new(&input, &self.config).parse();
        tracing::debug!(blocks = document.blocks.len(), "parsed markdown");
        document
    }

    /// Convert markdown to markup for the host editor.
    pub fn to_html(&self, input: &str) -> String {
        self.parse(input).to_html()
    }

    /// Convert a rendered tree back to markdown.
    pub fn to_markdown(&self, nodes: &[RenderedNode]) -> String {
        walker::Walker::new(&self.config).walk(nodes)
    }
}
