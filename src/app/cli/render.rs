//! Render command implementation.

use std::path::Path;

use crate::app::api::ToolOptions;
use crate::domain::AppError;

pub fn run_render(config: &Path, options: &ToolOptions) -> Result<(), AppError> {
    let outcome = crate::app::api::render(config, options)?;

    println!("✅ Rendered {}", outcome.app_name);
    println!("  📄 {}", outcome.template_path.display());
    println!("  📄 {}", outcome.parameters_path.display());
    println!(
        "  {} secret(s), {} variable(s), {} volume(s)",
        outcome.secrets, outcome.variables, outcome.volumes
    );
    Ok(())
}
