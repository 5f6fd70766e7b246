//! Morphin Engine - command-line entry point.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use morphin_domain::{BuffKind, Catalog, CharacterId, CharacterRecord, Localize, SpellKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use morphin_engine::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    image_folder::FolderImageLookup,
    localization::StringTable,
    ports::{CharacterStore, ClockPort, ImageLookupPort},
    selection::FixedSelection,
    sqlite_store::SqliteCharacterStore,
};
use morphin_engine::use_cases::transformation::{
    PolymorphRequest, TransformError, TransformationRequest,
};
use morphin_engine::App;

const USAGE: &str = "\
usage: morphin-engine <command>

  import <file.json>
  forms <kind> <level>
  preview <id> <kind> <level> <form>
  buff <id> <buff> [casterLevel]
  polymorph <id> <kind> <level> <form> [source]
  revert <id>
  show <id>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "morphin_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = EngineConfig::from_env();
    tracing::debug!(db = %config.db_path, images = ?config.image_path, "Loaded configuration");

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let store: Arc<dyn CharacterStore> =
        Arc::new(SqliteCharacterStore::new(&config.db_path, clock.clone()).await?);
    let images = config
        .image_path
        .as_ref()
        .map(|path| Arc::new(FolderImageLookup::new(path)) as Arc<dyn ImageLookupPort>);
    let labels: Arc<dyn Localize> = Arc::new(StringTable::english()?);
    let catalog = Arc::new(Catalog::builtin()?);

    let selection = match (command.as_str(), rest.first()) {
        ("import" | "forms", _) | (_, None) => FixedSelection::empty(),
        (_, Some(id)) => FixedSelection::single(parse_id(id)?),
    };
    let app = App::new(
        store,
        Arc::new(selection),
        images,
        labels,
        clock,
        catalog,
    );

    let result = run(&app, command, rest).await;
    match result {
        Err(CliError::Transform(e)) if e.warning_key().is_some() => {
            let text = warning_text(app.labels.as_ref(), &e);
            tracing::warn!(error = %e, "{}", text);
            eprintln!("{}", text);
            Ok(())
        }
        Err(CliError::Transform(e)) => Err(e.into()),
        Err(CliError::Other(e)) => Err(e),
        Ok(()) => Ok(()),
    }
}

enum CliError {
    Transform(TransformError),
    Other(anyhow::Error),
}

impl From<TransformError> for CliError {
    fn from(e: TransformError) -> Self {
        Self::Transform(e)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        Self::Other(e)
    }
}

async fn run(app: &App, command: &str, args: &[String]) -> Result<(), CliError> {
    match (command, args) {
        ("import", [file]) => {
            let json = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("reading {}", file))?;
            for character in parse_characters(&json)? {
                app.store
                    .save(&character)
                    .await
                    .map_err(TransformError::from)?;
                println!("{}\t{}", character.id, character.name);
            }
        }
        ("forms", [kind, level]) => {
            let forms = app
                .use_cases
                .forms
                .list(parse_kind(kind)?, parse_level(level)?)?;
            for form in forms {
                println!("{}\t{}", form.name, form.size);
            }
        }
        ("preview", [id, kind, level, form]) => {
            let request = polymorph_request(kind, level, form, None)?;
            let resolved = app.use_cases.forms.preview(parse_id(id)?, &request).await?;
            println!("{}", resolved.preview_text);
        }
        ("buff", [_, buff, rest @ ..]) if rest.len() <= 1 => {
            let kind = buff.parse::<BuffKind>().map_err(anyhow::Error::from)?;
            let caster_level = match rest.first() {
                Some(level) => parse_level(level)?,
                None => 1,
            };
            let snapshot = app
                .use_cases
                .transform(&TransformationRequest::Buff { kind, caster_level })
                .await?;
            println!("{} applied; original size {}", snapshot.source, snapshot.size);
        }
        ("polymorph", [_, kind, level, form, rest @ ..]) if rest.len() <= 1 => {
            let request = polymorph_request(kind, level, form, rest.first().cloned())?;
            let snapshot = app
                .use_cases
                .transform(&TransformationRequest::Polymorph(request))
                .await?;
            println!(
                "{} applied; {} items created",
                snapshot.buff_name,
                snapshot.items_created.len()
            );
        }
        ("revert", [_]) => {
            let snapshot = app.use_cases.revert_selected().await?;
            println!("{} reverted; size {}", snapshot.source, snapshot.size);
        }
        ("show", [id]) => {
            let character = app
                .store
                .get(parse_id(id)?)
                .await
                .map_err(TransformError::from)?
                .ok_or(TransformError::CharacterNotFound)?;
            let json = serde_json::to_string_pretty(&character).map_err(anyhow::Error::from)?;
            println!("{}", json);
        }
        _ => return Err(CliError::Other(anyhow::anyhow!("{}", USAGE))),
    }
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn parse_id(id: &str) -> anyhow::Result<CharacterId> {
    id.parse::<CharacterId>()
        .with_context(|| format!("invalid character id: {}", id))
}

fn parse_kind(kind: &str) -> anyhow::Result<SpellKind> {
    Ok(kind.parse::<SpellKind>()?)
}

fn parse_level(level: &str) -> anyhow::Result<u8> {
    level
        .parse::<u8>()
        .with_context(|| format!("invalid level: {}", level))
}

fn polymorph_request(
    kind: &str,
    level: &str,
    form: &str,
    source: Option<String>,
) -> anyhow::Result<PolymorphRequest> {
    Ok(PolymorphRequest {
        kind: parse_kind(kind)?,
        level: parse_level(level)?,
        form: form.to_string(),
        source,
    })
}

/// A single character document or an array of them.
fn parse_characters(json: &str) -> anyhow::Result<Vec<CharacterRecord>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(vec![serde_json::from_value(value)?])
    }
}

fn warning_text(labels: &dyn Localize, error: &TransformError) -> String {
    let Some(key) = error.warning_key() else {
        return error.to_string();
    };
    let text = labels.localize_or(key, &error.to_string());
    match error {
        TransformError::AlreadyTransformed { effect } => text.replace("{effect}", effect),
        TransformError::NotTransformed { name } => text.replace("{name}", name),
        _ => text,
    }
}
