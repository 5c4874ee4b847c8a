//! Output formatting for the CLI.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use storefront_commerce::catalog::Product;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    /// Turn colors off for both streams, regardless of terminal support.
    pub fn disable_colors(&self) {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    ///
    /// Every column but the last is truncated and padded to its width; the
    /// last is printed as-is so it may carry styling.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let last = cols.len().saturating_sub(1);
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (col, width))| {
                if i == last {
                    col.to_string()
                } else {
                    format!("{:width$}", truncate(col, *width), width = width)
                }
            })
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print a dim separator sized to the terminal.
    pub fn rule(&self) {
        if self.json {
            return;
        }
        let width = self.term_width().clamp(20, 80) - 2;
        println!("  {}", style("─".repeat(width)).dim());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width.
    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }
}

/// Stock badge as shown on product cards.
pub fn stock_badge(product: &Product) -> String {
    if !product.in_stock {
        style("Out of stock").red().to_string()
    } else if product.stock_count <= 5 {
        style(format!("Only {} left", product.stock_count))
            .yellow()
            .to_string()
    } else {
        style("In stock").green().to_string()
    }
}

/// Status badge for payment and order states.
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "succeeded" | "delivered" | "shipped" => style(status).green().to_string(),
        "processing" | "pending" | "requires_payment_method" => {
            style(status).yellow().to_string()
        }
        "failed" | "cancelled" => style(status).red().to_string(),
        _ => status.to_string(),
    }
}

/// Five-star rating bar, e.g. `★★★★☆ 4.5`.
pub fn rating_stars(rating: f64) -> String {
    let full = (rating.floor().clamp(0.0, 5.0)) as usize;
    format!("{}{} {:.1}", "★".repeat(full), "☆".repeat(5 - full), rating)
}

/// Shorten `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width || width == 0 {
        return text.to_string();
    }
    let kept: String = text.chars().take(width - 1).collect();
    format!("{}…", kept)
}
