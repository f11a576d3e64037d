#[derive(Debug, Clone, PartialEq)]
/// Request to fetch a repository file at an optional ref.
pub struct GetFileContentRequest {
    pub path: String,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to list the labels currently on a pull request.
pub struct ListLabelsRequest {
    pub pr_number: u64,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to add labels to a pull request in one batched call.
pub struct AddLabelsRequest {
    pub pr_number: u64,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Request to remove a single label from a pull request.
pub struct RemoveLabelRequest {
    pub pr_number: u64,
    pub label: String,
}
