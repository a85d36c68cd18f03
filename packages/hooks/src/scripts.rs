// ABOUTME: Shell script bodies written into the git hooks directory
// ABOUTME: Renders the pre-checkout reversal script and the post-checkout delegation line

use great_scott_config::constants::{GS_DST_BRANCH, GS_PRE_CHECKOUT};
use std::path::Path;

pub const POST_CHECKOUT: &str = "post-checkout";
pub const PRE_CHECKOUT: &str = "gs-pre-checkout";

/// Line inserted into post-checkout. Nested `git switch` calls made by the
/// pre-checkout script see the flag and exit early instead of recursing.
/// The script is found through the common git dir so linked worktrees work too.
pub fn delegation_line() -> String {
    format!(
        "if [ -n \"${flag}\" ] && \"${flag}\"; then exit 0; else . \"$(git rev-parse --git-common-dir)/hooks/{script}\"; fi",
        flag = GS_PRE_CHECKOUT,
        script = PRE_CHECKOUT,
    )
}

/// post-checkout body used when the repository has none yet
pub fn post_checkout_script() -> String {
    format!("#!/usr/bin/env bash\n{}\n", delegation_line())
}

/// Switches back to the branch being left, reverses its extra migrations, then
/// switches forward again. Skipped on a detached HEAD.
pub fn pre_checkout_script(executable: &Path) -> String {
    format!(
        r#"#!/usr/bin/env bash
# only run when HEAD is a branch, git symbolic-ref fails on a detached HEAD
if git symbolic-ref -q HEAD > /dev/null;
then
    export {flag}=true
    export {dst}=`git rev-parse --abbrev-ref HEAD`
    git switch --quiet -
    {exe} reverse --dst-branch "${dst}"
    git switch --quiet -
fi
"#,
        flag = GS_PRE_CHECKOUT,
        dst = GS_DST_BRANCH,
        exe = shell_quote(&executable.to_string_lossy()),
    )
}

/// Whether `line` is a shebang for a shell that can source the delegation line
pub fn is_shell_shebang(line: &str) -> bool {
    line.starts_with("#!") && (line.contains("/bin/sh") || line.contains("bash"))
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
