//! HTML fixtures shaped like MTurk search rows.

pub struct RowSpec {
    pub title: Option<&'static str>,
    pub requester_name: Option<&'static str>,
    pub requester_id: Option<&'static str>,
    pub reward: Option<&'static str>,
    pub group_id: Option<&'static str>,
    pub batch_size: Option<&'static str>,
}

impl Default for RowSpec {
    fn default() -> Self {
        Self {
            title: Some("Transcribe a receipt"),
            requester_name: Some("Acme Research"),
            requester_id: Some("A1REQ"),
            reward: Some("$0.25"),
            group_id: Some("3GROUP"),
            batch_size: Some("120"),
        }
    }
}

pub fn search_row(row: &RowSpec) -> String {
    let title = row
        .title
        .map(|t| format!(r##"<a class="capsulelink" href="#">{}</a>"##, t))
        .unwrap_or_default();

    let name = row
        .requester_name
        .map(|n| format!(r#"<span class="requesterIdentity">{}</span>"#, n))
        .unwrap_or_default();
    let requester = match row.requester_id {
        Some(id) => format!(
            r#"<a href="/mturk/searchbar?selectedSearchType=hitgroups&amp;requesterId={}">{}</a>"#,
            id, name
        ),
        None => name,
    };

    let reward = row
        .reward
        .map(|r| format!(r#"<span class="reward">{}</span>"#, r))
        .unwrap_or_default();

    let mut cells = r#"<td class="capsule_field_text">filler</td>"#.repeat(4);
    if let Some(batch) = row.batch_size {
        cells.push_str(&format!(r#"<td class="capsule_field_text">{}</td>"#, batch));
    }

    let group = row
        .group_id
        .map(|g| format!(r#"<a href="/mturk/preview?groupId={}">View a HIT in this group</a>"#, g))
        .unwrap_or_default();

    format!(
        r#"<table width="100%" cellspacing="0" cellpadding="0" border="0" height="100%">
<tr><td>{}</td></tr>
<tr><td>{}</td></tr>
<tr><td>{}</td>{}</tr>
<tr><td>{}</td></tr>
</table>"#,
        title, requester, reward, cells, group
    )
}

pub fn page(rows: &[String]) -> String {
    format!("<html><body>{}</body></html>", rows.join("\n"))
}
