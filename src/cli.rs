use crate::config::{load_config, Config};
use crate::json_utils::{get_value_at_path, read_json_file, set_value_at_path, write_json_file};
use crate::navigator::{navigate, NavigateOptions};
use crate::prompt::{blank_line, msg, Prompt};
use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use console::style;
use serde_json::Value;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "transedit", version, about = "interactive i18n catalog editor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new translated string at an interactively chosen key path
    Add(AddArgs),
    /// Copy an existing translation to another key path, per language
    Copy(CopyArgs),
}

#[derive(Args, Debug)]
#[command(after_help = "Example: transedit add --to ./locales --langs en,de,pl")]
pub struct AddArgs {
    /// Directory holding one JSON catalog per language
    #[arg(long)]
    pub to: PathBuf,
    /// Comma-separated language codes, e.g. en,de,pl (overrides config)
    #[arg(long)]
    pub langs: Option<String>,
}

#[derive(Args, Debug)]
#[command(after_help = "Example: transedit copy --from ./app/locales --to ./site/locales --langs en,de,pl")]
pub struct CopyArgs {
    /// Directory to copy the translation from
    #[arg(long)]
    pub from: PathBuf,
    /// Directory to copy the translation into
    #[arg(long)]
    pub to: PathBuf,
    /// Comma-separated language codes, e.g. en,de,pl (overrides config)
    #[arg(long)]
    pub langs: Option<String>,
}

pub async fn handle_add(args: AddArgs, prompt: &mut dyn Prompt) -> Result<()> {
    let cfg = load_config()?;
    let filenames = resolve_filenames(args.langs.as_deref(), &cfg)?;

    // The first language's catalog drives navigation for the whole set.
    let template_path = args.to.join(&filenames[0]);
    let template = read_json_file(&template_path)
        .with_context(|| format!("Loading destination catalog {:?}", template_path))?;

    msg(style("where do you want to add your translation?").blue());
    let to_keys = navigate(&template, &NavigateOptions { allow_new: true }, prompt)?;

    blank_line();
    msg(style("what's the string?").blue());
    let value = prompt.input("what value do you want for your translation?")?;

    blank_line();
    if !confirm_write(prompt, "add", &Value::String(value.clone()), &to_keys)? {
        msg("aborted, nothing written");
        return Ok(());
    }

    for filename in &filenames {
        let to_path = args.to.join(filename);
        let mut to_json = read_json_file(&to_path)?;
        set_value_at_path(&mut to_json, Value::String(value.clone()), &to_keys)
            .with_context(|| format!("Setting {} in {:?}", to_keys.join("."), to_path))?;
        write_json_file(&to_path, &to_json).await?;
        info!(file=?to_path, path=%to_keys.join("."), "Added translation");
    }
    Ok(())
}

pub async fn handle_copy(args: CopyArgs, prompt: &mut dyn Prompt) -> Result<()> {
    let cfg = load_config()?;
    let filenames = resolve_filenames(args.langs.as_deref(), &cfg)?;

    let from_template_path = args.from.join(&filenames[0]);
    let from_template = read_json_file(&from_template_path)
        .with_context(|| format!("Loading source catalog {:?}", from_template_path))?;
    let to_template_path = args.to.join(&filenames[0]);
    let to_template = read_json_file(&to_template_path)
        .with_context(|| format!("Loading destination catalog {:?}", to_template_path))?;

    msg(style("locate your translation:").blue());
    let from_keys = navigate(&from_template, &NavigateOptions { allow_new: false }, prompt)?;
    let from_value = get_value_at_path(&from_template, &from_keys)?.clone();

    blank_line();
    msg(style("where do you want me to copy it?").blue());
    let to_keys = navigate(&to_template, &NavigateOptions { allow_new: true }, prompt)?;

    blank_line();
    if !confirm_write(prompt, "copy", &from_value, &to_keys)? {
        msg("aborted, nothing written");
        return Ok(());
    }

    for filename in &filenames {
        let from_path = args.from.join(filename);
        let to_path = args.to.join(filename);
        let from_json = read_json_file(&from_path)?;
        let mut to_json = read_json_file(&to_path)?;
        // Re-resolve against the fresh file so each language carries its own text.
        let value = get_value_at_path(&from_json, &from_keys)
            .with_context(|| format!("Resolving {} in {:?}", from_keys.join("."), from_path))?
            .clone();
        set_value_at_path(&mut to_json, value, &to_keys)
            .with_context(|| format!("Setting {} in {:?}", to_keys.join("."), to_path))?;
        write_json_file(&to_path, &to_json).await?;
        info!(file=?to_path, path=%to_keys.join("."), "Copied translation");
    }
    Ok(())
}

fn resolve_filenames(langs_flag: Option<&str>, cfg: &Config) -> Result<Vec<String>> {
    let langs: Vec<String> = match langs_flag {
        Some(s) => s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => cfg.langs.clone(),
    };
    if langs.is_empty() {
        return Err(anyhow!("No languages specified (config or --langs)"));
    }
    Ok(langs
        .iter()
        .map(|lang| cfg.file_pattern.replace("{lang}", lang))
        .collect())
}

fn confirm_write(
    prompt: &mut dyn Prompt,
    verb: &str,
    value: &Value,
    to_keys: &[String],
) -> Result<bool> {
    msg(format!(
        "I am going to {} {} into {}.",
        verb,
        style(display_value(value)).red(),
        style(to_keys.join(".")).red(),
    ));
    prompt.confirm("is that correct?")
}

/// String leaves read verbatim; anything else shows as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::scripted::{Answer, ScriptedPrompt};
    use serde_json::json;
    use std::fs;
    use std::path::Path;

    fn write_fixture(dir: &Path, name: &str, value: &Value) {
        fs::write(
            dir.join(name),
            serde_json::to_string_pretty(value).unwrap(),
        )
        .unwrap();
    }

    fn read_fixture(dir: &Path, name: &str) -> Value {
        serde_json::from_str(&fs::read_to_string(dir.join(name)).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn add_writes_the_same_value_to_every_language() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "en.json", &json!({"a": {"b": "hi"}}));
        write_fixture(dir.path(), "de.json", &json!({"a": {"b": "hallo"}}));

        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Key("a".into()),
            Answer::Key("c".into()),
            Answer::Text("new".into()),
            Answer::Confirm(true),
        ]);
        let args = AddArgs {
            to: dir.path().to_path_buf(),
            langs: Some("en,de".into()),
        };
        handle_add(args, &mut prompt).await.unwrap();

        assert_eq!(
            read_fixture(dir.path(), "en.json"),
            json!({"a": {"b": "hi", "c": "new"}})
        );
        assert_eq!(
            read_fixture(dir.path(), "de.json"),
            json!({"a": {"b": "hallo", "c": "new"}})
        );
        assert!(prompt.is_drained());
    }

    #[tokio::test]
    async fn a_value_keeps_its_surrounding_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "en.json", &json!({"greet": {}}));

        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Key("greet".into()),
            Answer::Key("lead".into()),
            Answer::Text("Hello, ".into()),
            Answer::Confirm(true),
        ]);
        let args = AddArgs {
            to: dir.path().to_path_buf(),
            langs: Some("en".into()),
        };
        handle_add(args, &mut prompt).await.unwrap();

        assert_eq!(
            read_fixture(dir.path(), "en.json"),
            json!({"greet": {"lead": "Hello, "}})
        );
    }

    #[tokio::test]
    async fn copy_writes_the_value_and_leaves_the_source_alone() {
        let from = tempfile::tempdir().unwrap();
        let to = tempfile::tempdir().unwrap();
        write_fixture(from.path(), "en.json", &json!({"x": {"y": "value1"}}));
        write_fixture(to.path(), "en.json", &json!({"z": {}}));

        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Key("x".into()),
            Answer::Key("y".into()),
            Answer::Key("z".into()),
            Answer::Key("y".into()),
            Answer::Confirm(true),
        ]);
        let args = CopyArgs {
            from: from.path().to_path_buf(),
            to: to.path().to_path_buf(),
            langs: Some("en".into()),
        };
        handle_copy(args, &mut prompt).await.unwrap();

        assert_eq!(
            read_fixture(to.path(), "en.json"),
            json!({"z": {"y": "value1"}})
        );
        assert_eq!(
            read_fixture(from.path(), "en.json"),
            json!({"x": {"y": "value1"}})
        );
        assert!(prompt.is_drained());
    }

    #[tokio::test]
    async fn copy_carries_each_languages_own_text() {
        let from = tempfile::tempdir().unwrap();
        let to = tempfile::tempdir().unwrap();
        write_fixture(from.path(), "en.json", &json!({"greet": {"hello": "Hello"}}));
        write_fixture(from.path(), "de.json", &json!({"greet": {"hello": "Hallo"}}));
        write_fixture(to.path(), "en.json", &json!({"common": {}}));
        write_fixture(to.path(), "de.json", &json!({"common": {}}));

        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Key("greet".into()),
            Answer::Key("hello".into()),
            Answer::Key("common".into()),
            Answer::Key("hello".into()),
            Answer::Confirm(true),
        ]);
        let args = CopyArgs {
            from: from.path().to_path_buf(),
            to: to.path().to_path_buf(),
            langs: Some("en,de".into()),
        };
        handle_copy(args, &mut prompt).await.unwrap();

        assert_eq!(
            read_fixture(to.path(), "en.json"),
            json!({"common": {"hello": "Hello"}})
        );
        assert_eq!(
            read_fixture(to.path(), "de.json"),
            json!({"common": {"hello": "Hallo"}})
        );
    }

    #[tokio::test]
    async fn declined_confirmation_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let before = json!({"a": {"b": "hi"}});
        write_fixture(dir.path(), "en.json", &before);

        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Key("a".into()),
            Answer::Key("c".into()),
            Answer::Text("new".into()),
            Answer::Confirm(false),
        ]);
        let args = AddArgs {
            to: dir.path().to_path_buf(),
            langs: Some("en".into()),
        };
        handle_add(args, &mut prompt).await.unwrap();

        assert_eq!(read_fixture(dir.path(), "en.json"), before);
    }

    #[tokio::test]
    async fn a_missing_language_file_fails_but_earlier_writes_stay() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "en.json", &json!({"a": {"b": "hi"}}));
        // no de.json

        let mut prompt = ScriptedPrompt::new(vec![
            Answer::Key("a".into()),
            Answer::Key("c".into()),
            Answer::Text("new".into()),
            Answer::Confirm(true),
        ]);
        let args = AddArgs {
            to: dir.path().to_path_buf(),
            langs: Some("en,de".into()),
        };
        assert!(handle_add(args, &mut prompt).await.is_err());

        assert_eq!(
            read_fixture(dir.path(), "en.json"),
            json!({"a": {"b": "hi", "c": "new"}})
        );
    }

    #[test]
    fn langs_flag_overrides_config_and_must_not_be_empty() {
        let cfg = Config::default();
        let err = resolve_filenames(None, &cfg).unwrap_err();
        assert!(err.to_string().contains("No languages specified"));

        let names = resolve_filenames(Some("en, de ,,pl"), &cfg).unwrap();
        assert_eq!(names, ["en.json", "de.json", "pl.json"]);

        let cfg = Config {
            langs: vec!["fr".into()],
            file_pattern: "{lang}.messages.json".into(),
        };
        assert_eq!(resolve_filenames(None, &cfg).unwrap(), ["fr.messages.json"]);
    }

    #[test]
    fn values_display_verbatim_or_as_compact_json() {
        assert_eq!(display_value(&json!("hi")), "hi");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(["a", "b"])), r#"["a","b"]"#);
    }
}
