//! Command-line interface.

use clap::{Parser, Subcommand};
use site_counts_sdk::types::RenderContext;

/// Site Counts block server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server (default).
    Serve,

    /// Render one block to stdout.
    Render {
        /// Namespaced block name.
        #[arg(default_value = "site-counts/site-counts")]
        block: String,

        /// Id of the item being viewed.
        #[arg(long)]
        current: Option<String>,

        /// Extra wrapper class.
        #[arg(long)]
        class_name: Option<String>,

        /// Language code for translated strings.
        #[arg(long)]
        lang: Option<String>,
    },

    /// List registered blocks.
    Blocks,
}

impl Cli {
    /// The command to run; `serve` when none is given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

/// Build a render context from `render` arguments.
pub fn render_context(
    current: Option<String>,
    class_name: Option<String>,
    lang: Option<String>,
) -> RenderContext {
    let mut ctx = RenderContext::new();
    if let Some(id) = current {
        ctx = ctx.with_current_item(id);
    }
    if let Some(class_name) = class_name {
        ctx = ctx.with_class_name(class_name);
    }
    if let Some(lang) = lang {
        ctx = ctx.with_language(lang);
    }
    ctx
}
