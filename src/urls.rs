use reqwest::Url;

/// Builds the navigation targets used by the search widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    base: Url,
    results_path: String,
    detail_path: String,
}

impl SiteUrls {
    pub fn new(base: Url, results_path: &str, detail_path: &str) -> Self {
        Self {
            base,
            results_path: results_path.to_string(),
            detail_path: with_trailing_slash(detail_path),
        }
    }

    /// `/search/?q=<query>`
    pub fn search(&self, query: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&self.results_path);
        url.set_query(None);
        url.query_pairs_mut().append_pair("q", query);
        url
    }

    /// `/detail/<slug>/`
    pub fn product(&self, slug: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("{}{}/", self.detail_path, slug.trim_matches('/')));
        url.set_query(None);
        url
    }
}

fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}
