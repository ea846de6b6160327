use uuid::Uuid;

/// Joins the present segments with `/`
///
/// Missing segments are skipped. Segments are used verbatim, so a prefix
/// ending in `/` produces a double slash.
#[must_use]
pub fn build_path<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    segments.into_iter().flatten().collect::<Vec<_>>().join("/")
}

/// Returns the name a file is stored under
///
/// The original name is kept unless `random` is set, in which case a fresh
/// random name with the original's extension is generated.
#[must_use]
pub fn generate_name(original: &str, random: bool) -> String {
    if random {
        random_file_name(Some(original))
    } else {
        original.to_string()
    }
}

/// Generates a UUID v4 file name, keeping the last `.` segment of `original`
#[must_use]
pub fn random_file_name(original: Option<&str>) -> String {
    let mut name = Uuid::new_v4().to_string();

    if let Some(original) = original {
        let segments: Vec<&str> = original.split('.').collect();
        if let [_, .., extension] = segments.as_slice() {
            name.push('.');
            name.push_str(extension);
        }
    }

    name
}
