//! Showcase handler comparing the sum-to-n strategies.

use std::fmt::Write as _;

use axum::extract::Path;
use axum::response::{Html, IntoResponse};

use crate::application::sums::{self, StrategyReport};
use crate::infra::http::error::ApiError;

pub async fn show_sums(Path(n): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let n: u64 = n
        .parse()
        .map_err(|_| ApiError::bad_request("Num is undefined or num is not a number!"))?;

    let reports = sums::compare(n);
    Ok(Html(render_page(n, &reports)))
}

fn render_page(n: u64, reports: &[StrategyReport]) -> String {
    let mut sections = String::new();
    for report in reports {
        let _ = write!(sections, "{}", render_section(report));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Sum to {n}</title>\n\
         <style>.title {{ font-weight: 600; }}</style>\n</head>\n<body>\n\
         <h1>Summing 1..={n}</h1>\n\
         <div style=\"display:flex;flex-direction:row;gap:8px\">\n{sections}</div>\n\
         </body>\n</html>\n"
    )
}

fn render_section(report: &StrategyReport) -> String {
    let mut lists = String::new();
    let _ = writeln!(lists, "<p><span class=\"title\">Pros</span>:</p>");
    for item in report.pros {
        let _ = writeln!(lists, "<p>- {item}</p>");
    }
    let _ = writeln!(lists, "<p><span class=\"title\">Cons</span>:</p>");
    for item in report.cons {
        let _ = writeln!(lists, "<p>- {item}</p>");
    }

    format!(
        "<div>\n<h3>{title}</h3>\n\
         <p><span class=\"title\">Result</span>: {sum}</p>\n\
         <p><span class=\"title\">Time Complexity</span>: {time}</p>\n\
         <p><span class=\"title\">Space Complexity</span>: {space}</p>\n{lists}</div>\n",
        title = report.title,
        sum = report.sum,
        time = report.time_complexity,
        space = report.space_complexity,
    )
}
