//! Reference pages for the hardware catalog

use chrono::NaiveDate;

/// Render the GPU types reference page
pub fn gpu_page(project: &str, pricing_url: &str, generated: NaiveDate, table: &str) -> String {
    format!(
        r#"---
title: GPU types
---

The following list contains all GPU types available on {project}.

For more information, see [GPU pricing]({pricing_url}).

<!--
Table last generated: {date}
-->
{table}
"#,
        project = project,
        pricing_url = pricing_url,
        date = generated.format("%Y-%m-%d"),
        table = table.trim_end(),
    )
}

/// Render the serverless CPU types reference page
pub fn cpu_page(project: &str, generated: NaiveDate, table: &str) -> String {
    format!(
        r#"---
title: Serverless CPU types
---

The following list contains all CPU types available on {project}.

<!--
Table last generated: {date}
-->
{table}
"#,
        project = project,
        date = generated.format("%Y-%m-%d"),
        table = table.trim_end(),
    )
}
