//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - statevector emulation and circuit layering",
        style("qlayer").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qlayer-ir    Gates, circuits and layer scheduling");
    println!("  qlayer-sim   Dense statevector engine");
    println!("  qlayer-algo  Random circuits, QAOA max-cut, Grover search");
    println!("  qlayer-cli   Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/qlayer/qlayer").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
