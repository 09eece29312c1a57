use url::Url;

/// Web URL of an application's GitLab project.
///
/// # Arguments
///
/// * `base_url` - GitLab instance base URL (e.g., <https://gitlab.com>)
/// * `project_id` - Project path (e.g., "group/project")
///
/// Falls back to plain concatenation when `base_url` does not parse.
pub fn application_url(base_url: &str, project_id: &str) -> String {
    let project_id = project_id.trim_matches('/');
    match Url::parse(base_url) {
        Ok(mut url) => {
            let base_path = url.path().trim_end_matches('/').to_string();
            url.set_path(&format!("{base_path}/{project_id}"));
            url.to_string()
        }
        Err(_) => format!("{}/{project_id}", base_url.trim_end_matches('/')),
    }
}

/// Numeric pipeline id shown next to a pipeline run.
///
/// Taken from the last segment of `pipeline_url` (e.g.,
/// <https://gitlab.com/group/project/-/pipelines/123>), or `pipeline_id`
/// when the URL does not end in a number.
pub fn pipeline_label(pipeline_url: &str, pipeline_id: u64) -> String {
    extract_numeric_id(pipeline_url)
        .map_or_else(|| format!("#{pipeline_id}"), |id| format!("#{id}"))
}

fn extract_numeric_id(url: &str) -> Option<&str> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()))
}
