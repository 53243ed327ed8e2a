use std::{
    path::{Path, PathBuf, MAIN_SEPARATOR_STR},
    process::Stdio,
};

use log::info;
use tokio::process::{Child, Command};

use crate::json::meta::{Argument, VersionMeta};

use super::{
    paths::Paths,
    rule::{argument_rules_allow, rules_allow},
    CLASSPATH_SEPARATOR,
};

pub const DEBUG_FLAG: &str = "-Dorg.lwjgl.util.DebugLoader=true";

const LAUNCHER_NAME: &str = env!("CARGO_PKG_NAME");
const LAUNCHER_VERSION: &str = env!("CARGO_PKG_VERSION");
const NIL_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Placeholders that have no value without an authenticated session.
const AUTH_TOKENS: [&str; 3] = [
    "${auth_player_name}",
    "${auth_access_token}",
    "${auth_uuid}",
];

/// Who the game is started for.
#[derive(Debug, Clone)]
pub enum UserIdentity {
    Offline,
    Demo { name: String },
    Authenticated { name: String, token: String, uuid: String },
}

impl UserIdentity {
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline)
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo { .. })
    }
}

/// Runtime values needed to fully resolve an argument template.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    pub version: String,
    pub classpath: String,
    pub game_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub natives_dir: PathBuf,
    pub user: UserIdentity,
}

#[derive(Clone, Copy)]
enum Phase {
    Jvm,
    Game,
}

/// An evaluated template literal. `Dropped` marks an argument that resolved
/// to nothing (an auth placeholder without a session) and participates in the
/// collapse pass below.
enum Evaluated {
    Arg(String),
    Dropped,
}

/// Expands the manifest's argument templates into the exact process argument
/// list: JVM arguments, the LWJGL debug flag, the main class, then game
/// arguments.
pub fn build_command_line(meta: &VersionMeta, ctx: &LaunchContext) -> Vec<String> {
    let mut jvm = Vec::new();
    for node in &meta.arguments.jvm {
        evaluate(node, Phase::Jvm, ctx, &mut jvm);
    }
    jvm.push(Evaluated::Arg(DEBUG_FLAG.to_string()));

    let mut arguments = collapse_dropped(jvm);
    arguments.push(meta.main_class.clone());

    let mut game = Vec::new();
    for node in &meta.arguments.game {
        evaluate(node, Phase::Game, ctx, &mut game);
    }
    arguments.extend(collapse_dropped(game));

    arguments
}

fn evaluate(node: &Argument, phase: Phase, ctx: &LaunchContext, out: &mut Vec<Evaluated>) {
    match node {
        Argument::Plain(text) => out.push(substitute(text, phase, ctx)),
        Argument::Conditional { rules, value } => {
            if argument_rules_allow(rules, ctx.user.is_demo()) {
                evaluate(value, phase, ctx, out);
            }
        }
        Argument::List(items) => {
            for item in items {
                evaluate(item, phase, ctx, out);
            }
        }
    }
}

fn substitute(text: &str, phase: Phase, ctx: &LaunchContext) -> Evaluated {
    let resolved = match phase {
        Phase::Jvm => text
            .replace("${launcher_name}", LAUNCHER_NAME)
            .replace("${launcher_version}", LAUNCHER_VERSION)
            .replace("${classpath}", &ctx.classpath)
            .replace("${natives_directory}", &ctx.natives_dir.to_string_lossy()),
        Phase::Game => {
            if ctx.user.is_offline() && AUTH_TOKENS.iter().any(|token| text.contains(token)) {
                return Evaluated::Dropped;
            }

            let text = text
                .replace("${version_name}", &ctx.version)
                .replace("${version_type}", LAUNCHER_NAME)
                .replace("${game_directory}", &ctx.game_dir.to_string_lossy())
                .replace("${assets_root}", &ctx.assets_dir.to_string_lossy())
                .replace("${assets_index_name}", &ctx.version)
                .replace("${user_type}", "mojang");

            match &ctx.user {
                UserIdentity::Offline => text,
                UserIdentity::Demo { name } => text
                    .replace("${auth_player_name}", name)
                    .replace("${auth_access_token}", "0")
                    .replace("${auth_uuid}", NIL_UUID),
                UserIdentity::Authenticated { name, token, uuid } => text
                    .replace("${auth_player_name}", name)
                    .replace("${auth_access_token}", token)
                    .replace("${auth_uuid}", uuid),
            }
        }
    };

    // A marker the context cannot fill would end up verbatim in the game's
    // command line. That is a defect, never a user error.
    assert!(
        !resolved.contains("${"),
        "unresolved template token in argument {resolved:?}"
    );

    Evaluated::Arg(resolved)
}

/// Post-processing pass for dropped arguments: a dropped entry directly
/// following another dropped entry also removes the last emitted argument,
/// collapsing "flag followed by now-pointless value" pairs.
fn collapse_dropped(entries: Vec<Evaluated>) -> Vec<String> {
    let mut out = Vec::new();
    let mut previous_dropped = false;

    for entry in entries {
        match entry {
            Evaluated::Arg(argument) => {
                out.push(argument);
                previous_dropped = false;
            }
            Evaluated::Dropped => {
                if previous_dropped {
                    out.pop();
                }
                previous_dropped = true;
            }
        }
    }

    out
}

/// Classpath of every rule-allowed, non-native library plus the client jar,
/// in manifest order.
pub fn build_classpath(meta: &VersionMeta, paths: &Paths, client_jar: &Path) -> String {
    let libraries_dir = paths.libraries_dir();

    let mut entries: Vec<String> = meta
        .libraries
        .iter()
        .filter(|lib| lib.natives.is_none() && rules_allow(&lib.rules))
        .filter_map(|lib| lib.downloads.as_ref()?.artifact.as_ref()?.path.as_ref())
        .map(|path| {
            libraries_dir
                .join(path.replace('/', MAIN_SEPARATOR_STR))
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    entries.push(client_jar.to_string_lossy().into_owned());

    entries.join(CLASSPATH_SEPARATOR)
}

/// Builds the full command line and spawns the game process.
pub async fn launch(java: &Path, meta: &VersionMeta, ctx: &LaunchContext) -> crate::Result<Child> {
    let arguments = build_command_line(meta, ctx);
    info!("Launching {}", ctx.version);

    let child = Command::new(java)
        .args(arguments)
        .current_dir(&ctx.game_dir)
        .stdout(Stdio::inherit())
        .spawn()?;

    Ok(child)
}

/// Waits for the game to exit and maps its exit code through, for callers
/// that propagate it as their own status.
pub async fn wait_for_exit(child: &mut Child) -> crate::Result<i32> {
    let status = child.wait().await?;
    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minecraft::TARGET_OS;
    use serde_json::json;

    fn meta(jvm: serde_json::Value, game: serde_json::Value) -> VersionMeta {
        serde_json::from_value(json!({
            "id": "1.19",
            "mainClass": "net.minecraft.client.main.Main",
            "arguments": {"game": game, "jvm": jvm},
            "assetIndex": {"id": "1.19", "url": "https://example.invalid/1.19.json"},
            "downloads": {},
            "libraries": [],
            "type": "release"
        }))
        .unwrap()
    }

    fn context(user: UserIdentity) -> LaunchContext {
        LaunchContext {
            version: "1.19".to_string(),
            classpath: "cp".to_string(),
            game_dir: PathBuf::from("/tmp/game"),
            assets_dir: PathBuf::from("/tmp/assets"),
            natives_dir: PathBuf::from("/tmp/natives"),
            user,
        }
    }

    #[test]
    fn jvm_then_debug_flag_then_main_class_then_game() {
        let meta = meta(
            json!(["-Djava.library.path=${natives_directory}"]),
            json!(["--version", "${version_name}"]),
        );
        let arguments = build_command_line(&meta, &context(UserIdentity::Offline));
        assert_eq!(
            arguments,
            vec![
                "-Djava.library.path=/tmp/natives",
                DEBUG_FLAG,
                "net.minecraft.client.main.Main",
                "--version",
                "1.19",
            ]
        );
    }

    #[test]
    fn offline_auth_tokens_drop_without_touching_neighbors() {
        let meta = meta(
            json!([]),
            json!(["${auth_player_name}", "--foo", "${auth_access_token}"]),
        );
        let arguments = build_command_line(&meta, &context(UserIdentity::Offline));
        assert_eq!(
            arguments,
            vec![DEBUG_FLAG, "net.minecraft.client.main.Main", "--foo"]
        );
    }

    #[test]
    fn adjacent_dropped_tokens_collapse_the_previous_argument() {
        let meta = meta(
            json!([]),
            json!(["--username", "${auth_player_name}", "${auth_uuid}"]),
        );
        let arguments = build_command_line(&meta, &context(UserIdentity::Offline));
        assert_eq!(arguments, vec![DEBUG_FLAG, "net.minecraft.client.main.Main"]);
    }

    #[test]
    fn authenticated_user_fills_auth_tokens() {
        let meta = meta(json!([]), json!(["--accessToken", "${auth_access_token}"]));
        let user = UserIdentity::Authenticated {
            name: "steve".to_string(),
            token: "abc123".to_string(),
            uuid: "aaaa-bbbb".to_string(),
        };
        let arguments = build_command_line(&meta, &context(user));
        assert_eq!(arguments[3], "abc123");
    }

    #[test]
    fn demo_user_gets_demo_gated_arguments() {
        let meta = meta(
            json!([]),
            json!([{
                "rules": [{"action": "allow", "features": {"is_demo_user": true}}],
                "value": "--demo"
            }]),
        );

        let demo = build_command_line(&meta, &context(UserIdentity::Demo { name: "steve".into() }));
        assert_eq!(demo.last().map(String::as_str), Some("--demo"));

        let offline = build_command_line(&meta, &context(UserIdentity::Offline));
        assert_eq!(
            offline.last().map(String::as_str),
            Some("net.minecraft.client.main.Main")
        );
    }

    #[test]
    fn conditional_list_value_expands_in_order() {
        let meta = meta(
            json!([{
                "rules": [{"action": "allow", "os": {"name": TARGET_OS}}],
                "value": ["-Xss1M", "-Dfoo=bar"]
            }]),
            json!([]),
        );
        let arguments = build_command_line(&meta, &context(UserIdentity::Offline));
        assert_eq!(&arguments[..2], &["-Xss1M", "-Dfoo=bar"]);
    }

    #[test]
    fn platform_disallowed_conditional_is_skipped() {
        let meta = meta(
            json!([{
                "rules": [{"action": "disallow", "os": {"name": TARGET_OS}}],
                "value": "-XstartOnFirstThread"
            }]),
            json!([]),
        );
        let arguments = build_command_line(&meta, &context(UserIdentity::Offline));
        assert_eq!(arguments, vec![DEBUG_FLAG, "net.minecraft.client.main.Main"]);
    }

    #[test]
    fn command_line_is_deterministic() {
        let meta = meta(
            json!(["-cp", "${classpath}"]),
            json!(["--gameDir", "${game_directory}"]),
        );
        let ctx = context(UserIdentity::Offline);
        let first = build_command_line(&meta, &ctx);
        for _ in 0..5 {
            assert_eq!(build_command_line(&meta, &ctx), first);
        }
    }

    #[test]
    #[should_panic(expected = "unresolved template token")]
    fn unknown_token_is_a_hard_failure() {
        let meta = meta(json!([]), json!(["${quick_play_path}"]));
        build_command_line(&meta, &context(UserIdentity::Offline));
    }

    #[test]
    fn classpath_skips_natives_and_ends_with_client_jar() {
        let meta: VersionMeta = serde_json::from_value(json!({
            "id": "1.19",
            "mainClass": "net.minecraft.client.main.Main",
            "arguments": {"game": [], "jvm": []},
            "assetIndex": {"id": "1.19", "url": "https://example.invalid/1.19.json"},
            "downloads": {},
            "libraries": [
                {
                    "name": "a",
                    "downloads": {"artifact": {"path": "org/a/a.jar", "url": "http://x/a.jar"}}
                },
                {
                    "name": "lwjgl-natives",
                    "downloads": {"artifact": {"path": "natives.jar", "url": "http://x/n.jar"}},
                    "natives": {"linux": "natives-linux"}
                }
            ],
            "type": "release"
        }))
        .unwrap();

        let paths = Paths::new("/data");
        let classpath = build_classpath(&meta, &paths, Path::new("/instance/client.jar"));

        let entries: Vec<&str> = classpath.split(CLASSPATH_SEPARATOR).collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with("a.jar"));
        assert!(entries[0].contains("libraries"));
        assert!(entries[1].ends_with("client.jar"));
    }
}
