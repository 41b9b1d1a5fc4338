use std::sync::Arc;

use crate::config::Config;
use crate::db::SubmissionStore;
use crate::email::EnquiryMailer;
use crate::render::PdfRenderer;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn SubmissionStore>,
    pub renderer: Arc<dyn PdfRenderer>,
    pub mailer: Option<Arc<dyn EnquiryMailer>>,
}
