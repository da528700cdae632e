//! Export command: write the dashboard as a standalone HTML file.

use std::fs;
use std::path::Path;
use std::time::Instant;

use palmer::RenderedOutput;
use palmer::render::html_escape;
use palmer_core::InputDef;

use crate::colors;
use crate::dashboard::{FilterArgs, open_session};

const DEFAULT_OUTPUT: &str = "penguins.html";
const TITLE: &str = "Palmer Penguins";

/// Render every output and write the page.
pub fn execute(filters: &FilterArgs, output_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    println!("\n{}Palmer Export{}", colors::BOLD, colors::RESET);
    println!("{}", colors::rule());

    let session = open_session(filters, TITLE)?;
    let html = generate_html(session.title(), &session.inputs(), &session.render_all());

    let output_file = output_path.unwrap_or(Path::new(DEFAULT_OUTPUT));
    fs::write(output_file, html)?;

    println!(
        "{}Exported{} {} rows to {}{}{}",
        colors::GREEN,
        colors::RESET,
        session.filtered_data().len(),
        colors::CYAN,
        output_file.display(),
        colors::RESET
    );
    println!("Total time: {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// A self-contained page: input summary, tables inline, charts drawn by plotly.js.
pub fn generate_html(title: &str, inputs: &[InputDef], outputs: &[RenderedOutput]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str(
        "<script src=\"https://cdn.plot.ly/plotly-2.35.2.min.js\" charset=\"utf-8\"></script>\n",
    );
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));

    html.push_str("<section class=\"inputs\"><h2>Inputs</h2><dl>\n");
    for input in inputs {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            html_escape(input.label()),
            html_escape(&current_value(input))
        ));
    }
    html.push_str("</dl></section>\n");

    for output in outputs {
        html.push_str(&format!(
            "<section class=\"output\" id=\"{}\">\n<h2>{}</h2>\n{}\n</section>\n",
            output.id,
            html_escape(&output.title),
            output.html
        ));
    }

    html.push_str(SCRIPT);
    html.push_str("</body>\n</html>\n");
    html
}

fn current_value(input: &InputDef) -> String {
    match input {
        InputDef::Selectize { selected, .. } => selected.clone(),
        InputDef::Numeric { value, .. } | InputDef::Slider { value, .. } => value.to_string(),
        InputDef::CheckboxGroup { selected, .. } if selected.is_empty() => "(none)".to_string(),
        InputDef::CheckboxGroup { selected, .. } => selected.join(", "),
    }
}

const STYLE: &str = r#"<style>
body { font-family: system-ui, sans-serif; margin: 2rem; color: #1f2937; }
.inputs dl { display: grid; grid-template-columns: max-content 1fr; gap: 0.25rem 1rem; }
.inputs dt { font-weight: 600; }
.output { margin-top: 2rem; }
.palmer-datatable, .palmer-datagrid { border-collapse: collapse; font-size: 0.85rem; }
.palmer-datatable th, .palmer-datatable td, .palmer-datagrid th, .palmer-datagrid td {
    padding: 0.2rem 0.5rem; border-bottom: 1px solid #e5e7eb; text-align: left;
}
.palmer-datagrid-wrapper { max-height: 440px; overflow: auto; }
</style>
"#;

const SCRIPT: &str = r#"<script>
document.querySelectorAll('script[data-figure-for]').forEach((el) => {
    const figure = JSON.parse(el.textContent);
    const target = document.querySelector(`div[data-output="${el.dataset.figureFor}"]`);
    if (target) Plotly.newPlot(target, figure.data, figure.layout, { responsive: true });
});
</script>
"#;
