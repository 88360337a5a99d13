/// Render seconds as `MM:SS`.
///
/// There is no hour field: two hours five minutes reads `125:05`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
