use widget_core::package::PluginPackage;
use widget_core::report::{Outcome, Section, Severity};

fn usage() -> ! {
    eprintln!("usage: plugin_validator [PACKAGE_DIR] [--json]");
    std::process::exit(2);
}

fn main() {
    let mut dir: Option<String> = None;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--help" | "-h" => usage(),
            other if other.starts_with('-') => {
                eprintln!("unknown flag: {}", other);
                usage();
            }
            other => {
                if dir.replace(other.to_string()).is_some() {
                    usage();
                }
            }
        }
    }
    let dir = dir.unwrap_or_else(|| ".".to_string());

    let package = match PluginPackage::load(&dir) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("validator error: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = package.validate();
    if json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("validator error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        render(&outcome);
    }

    std::process::exit(if outcome.success() { 0 } else { 1 });
}

fn render(outcome: &Outcome) {
    println!("Validating widget plugin package...\n");
    for report in &outcome.sections {
        println!("{}", title(report.section));
        for m in &report.result.messages {
            println!("  {} {}", glyph(m.severity), m.text);
        }
        println!();
    }

    println!("{}", "=".repeat(50));
    println!("VALIDATION SUMMARY");
    println!("{}", "=".repeat(50));
    if outcome.errors == 0 && outcome.warnings == 0 {
        println!("All checks passed! Package is ready.");
    } else {
        if outcome.errors > 0 {
            println!("{} error(s) found", outcome.errors);
        }
        if outcome.warnings > 0 {
            println!("{} warning(s) found", outcome.warnings);
        }
    }
}

fn title(section: Section) -> &'static str {
    match section {
        Section::Files => "Checking required files...",
        Section::Schema => "Validating plugin.json...",
        Section::SampleData => "Validating sample-merge-variables.json...",
        Section::Content => "Validating quotes.json...",
        Section::Template => "Validating plugin.html...",
        Section::TestData => "Validating test data...",
    }
}

fn glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Pass => "\u{2705}",
        Severity::Fail => "\u{274c}",
        Severity::Warn => "\u{26a0}\u{fe0f}",
    }
}
