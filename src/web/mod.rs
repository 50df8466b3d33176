//! Web module - Page assembly and HTTP serving

mod page;
mod server;

pub use page::{render_dashboard, render_stats_table};
pub use server::serve;
