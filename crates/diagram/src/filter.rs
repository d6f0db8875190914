/// Decides which projects appear in the diagram
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Lowercased exclusion tokens
    excluded: Vec<String>,
}

impl ProjectFilter {
    /// Blank entries are dropped.
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded: excluded
                .into_iter()
                .filter(|x| !x.as_ref().trim().is_empty())
                .map(|x| x.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// False when `project_id` contains any exclusion token, ignoring case
    pub fn is_allowed(&self, project_id: &str) -> bool {
        if self.excluded.is_empty() {
            return true;
        }
        let id = project_id.to_lowercase();
        !self.excluded.iter().any(|x| id.contains(x.as_str()))
    }
}
