//! Static informational pages. No data access; the handler only names the
//! page for the template collaborator.

use super::{HandlerError, Handlers, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPage {
    Author,
    Tech,
}

impl Handlers {
    /// GET `/about/author/`.
    pub fn about_author(&self) -> Result<View<StaticPage>, HandlerError> {
        Ok(View::Render(StaticPage::Author))
    }

    /// GET `/about/tech/`.
    pub fn about_tech(&self) -> Result<View<StaticPage>, HandlerError> {
        Ok(View::Render(StaticPage::Tech))
    }
}
