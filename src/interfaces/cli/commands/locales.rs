//! `locales check`：校验各区域翻译表是否完整

use colored::Colorize;

use crate::i18n;
use crate::interfaces::cli::CliError;
use crate::region::Region;

/// 单个区域的检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleReport {
    pub region: Region,
    pub missing: Vec<&'static str>,
    pub empty: Vec<&'static str>,
}

impl LocaleReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.empty.is_empty()
    }
}

pub fn locale_report() -> Vec<LocaleReport> {
    Region::all()
        .map(|region| LocaleReport {
            region,
            missing: i18n::missing_keys(region),
            empty: i18n::empty_values(region),
        })
        .collect()
}

pub fn check_locales() -> Result<(), CliError> {
    let reports = locale_report();
    let total_keys = i18n::keys().len();

    for report in &reports {
        if report.is_complete() {
            println!(
                "{} {} ({}) {} keys",
                "✓".bold().green(),
                report.region.code().cyan(),
                report.region.locale(),
                total_keys
            );
            continue;
        }

        println!(
            "{} {} ({})",
            "✗".bold().red(),
            report.region.code().cyan(),
            report.region.locale()
        );
        for key in &report.missing {
            println!("    {} {}", "missing".red(), key);
        }
        for key in &report.empty {
            println!("    {} {}", "empty".yellow(), key);
        }
    }

    let incomplete = reports.iter().filter(|r| !r.is_complete()).count();
    if incomplete > 0 {
        return Err(CliError::CommandError(format!(
            "{} region(s) have incomplete translations",
            incomplete
        )));
    }
    Ok(())
}
