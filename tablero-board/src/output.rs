/// The outcome of building a page: a chart spec, or a warning when the
/// current selection produces nothing to draw. Empty selections are a
/// user-facing message, never an error.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutput<T> {
    Chart(T),
    Empty { message: String },
}

impl<T> PageOutput<T> {
    pub fn empty(message: impl Into<String>) -> Self {
        let message = message.into();
        log::warn!("{}", message);
        PageOutput::Empty { message }
    }

    pub fn chart(self) -> Option<T> {
        match self {
            PageOutput::Chart(chart) => Some(chart),
            PageOutput::Empty { .. } => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PageOutput::Empty { .. })
    }
}
