use console::style;

use recap_core::SummaryResult;

/// Print all provider results, successes and failures interleaved.
pub fn print_results(results: &[SummaryResult]) {
    for result in results {
        println!("{}", style("─".repeat(60)).dim());
        let header = format!(
            "{} {}",
            style(result.provider.name()).cyan().bold(),
            style(&result.model_name).dim()
        );
        if result.success {
            println!("{} {}\n", style("✓").green().bold(), header);
            println!("{}\n", result.summary.trim());
        } else {
            println!("{} {}\n", style("✗").red().bold(), header);
            println!(
                "{}\n",
                style(result.error.as_deref().unwrap_or("unknown error")).red()
            );
        }
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{} {} of {} providers succeeded\n",
        style("Done:").dim(),
        succeeded,
        results.len()
    );
}
