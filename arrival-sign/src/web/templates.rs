//! Askama templates for the sign page.

use askama::Template;

use crate::board::BoardSnapshot;

/// The whole sign, or a placeholder before the first refresh.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate<'a> {
    pub station: &'a str,
    pub board: Option<&'a BoardSnapshot>,
}

impl BoardTemplate<'_> {
    /// Feed time as shown in the footer.
    pub fn feed_time(&self) -> String {
        self.board
            .and_then(|b| b.feed_time)
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}
