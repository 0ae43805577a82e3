//! Report generation port trait.

use std::io::Write;

use crate::domain::error::PapertradeError;
use crate::domain::instrument::Instrument;
use crate::domain::session::Session;

/// Port for rendering the end-of-session portfolio report.
pub trait ReportPort {
    fn write(
        &self,
        session: &Session,
        catalog: &[Instrument],
        out: &mut dyn Write,
    ) -> Result<(), PapertradeError>;
}
