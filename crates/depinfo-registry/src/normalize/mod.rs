//! Normalization of registry license and repository fields

/// Placeholder repository used by packages npm has taken over for security reasons
pub const SECURITY_HOLDER: &str = "npm/security-holder";

const GITHUB_HTTPS: &str = "https://github.com";
const GITHUB_ALIASES: [&str; 2] = ["git://github.com", "ssh://git@github.com"];

/// Normalize a repository URL into a browsable form
///
/// `git+ssh://git@github.com/org/repo.git` becomes `https://github.com/org/repo`.
/// Normalizing an already normalized URL returns it unchanged.
pub fn normalize_repository_url(url: &str) -> String {
    let mut url = url;
    while let Some(rest) = url.strip_prefix("git+") {
        url = rest;
    }

    let mut url = GITHUB_ALIASES
        .iter()
        .find_map(|alias| url.strip_prefix(*alias))
        .map(|rest| format!("{}{}", GITHUB_HTTPS, rest))
        .unwrap_or_else(|| url.to_string());

    while url.ends_with(".git") {
        url.truncate(url.len() - ".git".len());
    }

    if url == SECURITY_HOLDER {
        url.clear();
    }
    url
}

/// Join license identifiers with `;`, keeping their order
pub fn join_licenses<'a>(identifiers: impl IntoIterator<Item = &'a str>) -> String {
    identifiers.into_iter().collect::<Vec<_>>().join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_git_ssh_url() {
        assert_eq!(
            normalize_repository_url("git+ssh://git@github.com/org/repo.git"),
            "https://github.com/org/repo"
        );
    }

    #[test]
    fn test_git_protocol_url() {
        assert_eq!(
            normalize_repository_url("git://github.com/substack/node-mkdirp.git"),
            "https://github.com/substack/node-mkdirp"
        );
    }

    #[test]
    fn test_git_plus_https_url() {
        assert_eq!(
            normalize_repository_url("git+https://github.com/lodash/lodash.git"),
            "https://github.com/lodash/lodash"
        );
    }

    #[test]
    fn test_non_github_hosts_keep_their_host() {
        assert_eq!(
            normalize_repository_url("git+https://gitlab.com/group/project.git"),
            "https://gitlab.com/group/project"
        );
    }

    #[test]
    fn test_only_suffix_is_stripped() {
        // a name ending in 'g', 'i' or 't' must survive
        assert_eq!(
            normalize_repository_url("https://github.com/org/widget"),
            "https://github.com/org/widget"
        );
    }

    #[test]
    fn test_security_holder() {
        assert_eq!(normalize_repository_url("npm/security-holder"), "");
        assert_eq!(normalize_repository_url("npm/security-holder.git"), "");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_repository_url(""), "");
    }

    #[test]
    fn test_join_licenses() {
        assert_eq!(join_licenses(["MIT", "Apache-2.0"]), "MIT;Apache-2.0");
        assert_eq!(join_licenses(["MIT"]), "MIT");
        assert_eq!(join_licenses(Vec::<&str>::new()), "");
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(url in "(git\\+){0,2}(git://github\\.com|ssh://git@github\\.com|https://github\\.com|npm)?/[a-z.+]{0,12}(/[a-z]{1,8})?(\\.git){0,2}") {
            let once = normalize_repository_url(&url);
            prop_assert_eq!(normalize_repository_url(&once), once);
        }

        #[test]
        fn normalization_is_idempotent_for_any_input(url in ".*") {
            let once = normalize_repository_url(&url);
            prop_assert_eq!(normalize_repository_url(&once), once);
        }
    }
}
