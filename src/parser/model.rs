use serde::Deserialize;

/// YAML front matter of a page seed file.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PageFrontMatter {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub template: Option<String>,
    pub is_top_level_path: Option<bool>,
    pub landing_page: Option<bool>,
    pub subforem_id: Option<i64>,
    pub body_json: Option<String>,
}
