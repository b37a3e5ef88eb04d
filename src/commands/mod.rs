//! CLI command implementations

mod enrich;
mod import;
mod init;
mod report;
mod status;

pub use enrich::{cmd_categorize, cmd_metadata, cmd_plots, print_batch_report};
pub use import::{cmd_import, print_import_stats, ImportStats};
pub use init::cmd_init;
pub use report::{cmd_report, write_report};
pub use status::{cmd_status, print_status, StatusInfo};
