//! Command handlers
//!
//! Each handler builds the same controllers the desktop pages use and
//! prints the resulting notices instead of toasting them.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;

use backoffice_api::ApiClient;
use backoffice_console::toggle::reduce;
use backoffice_console::{
    ConsoleContext, FormController, FormMode, ListController, PrefillOutcome, StatusToggle,
    SubmitOutcome, confirm_prompt, fetch_for_edit, sign_in, sign_in_failure, sign_out, submit,
};
use backoffice_core::{
    ConsoleConfig, ConsoleError, Credentials, EntityKind, RecordApi, RecordId,
};

use crate::output;
use crate::{Cli, Command};

type Ctx = ConsoleContext<ApiClient>;

/// Run one parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConsoleConfig::load(cli.config.as_deref()).context("loading configuration")?;
    tracing::debug!("API base URL: {}", config.base_url());

    match cli.command {
        Command::Login { user, password } => login(config, user, password).await,
        Command::Logout => logout(&config),
        Command::Whoami => whoami(&config, cli.json),
        Command::List {
            entity,
            search,
            page,
            building,
        } => {
            let ctx = connect(config)?;
            list(&ctx, entity, search, page, building, cli.json).await
        }
        Command::Show { entity, id } => {
            let ctx = connect(config)?;
            show(&ctx, entity, id, cli.json).await
        }
        Command::Toggle { entity, id, yes } => {
            let ctx = connect(config)?;
            toggle(&ctx, entity, id, yes).await
        }
        Command::Create { entity, fields } => {
            let ctx = connect(config)?;
            let mut form = FormController::new(entity, FormMode::Create);
            apply_fields(&mut form, &fields)?;
            save(&ctx, form).await
        }
        Command::Update {
            entity,
            id,
            fields,
            old_password,
            new_password,
        } => {
            let ctx = connect(config)?;
            update(&ctx, entity, id, fields, old_password, new_password).await
        }
    }
}

/// Context for commands that need a signed-in session
fn connect(config: ConsoleConfig) -> Result<Ctx> {
    let store = config.session_store()?;
    let session = store.load().map_err(|e| match e {
        ConsoleError::NotLoggedIn => anyhow!("Not logged in; run `backoffice-cli login` first"),
        other => anyhow!(other),
    })?;
    let api = ApiClient::from_config(&config)?.with_session(&session);
    Ok(ConsoleContext::new(api, session, config))
}

// ============================================================================
// Session
// ============================================================================

async fn login(config: ConsoleConfig, user: String, password: String) -> Result<()> {
    let api = ApiClient::from_config(&config)?;
    let store = config.session_store()?;
    let credentials = Credentials::new(user, password);

    let session = sign_in(&api, &store, &credentials)
        .await
        .map_err(|e| anyhow!(sign_in_failure(&e)))?;

    println!("{} Login successful", "✓".green().bold());
    println!("  tenant:  {}", session.client_id);
    println!("  session: {}", store.path().display());
    Ok(())
}

fn logout(config: &ConsoleConfig) -> Result<()> {
    let store = config.session_store()?;
    sign_out(&store)?;
    println!("Signed out");
    Ok(())
}

fn whoami(config: &ConsoleConfig, json: bool) -> Result<()> {
    let store = config.session_store()?;
    let session = match store.load() {
        Ok(session) => session,
        Err(ConsoleError::NotLoggedIn) => bail!("Not logged in"),
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!("operator: {}", session.display_name().unwrap_or("Operator"));
    println!("tenant:   {}", session.client_id);
    println!("api:      {}", config.base_url());
    Ok(())
}

// ============================================================================
// Records
// ============================================================================

async fn list(
    ctx: &Ctx,
    kind: EntityKind,
    search: Option<String>,
    page: usize,
    building: Option<RecordId>,
    json: bool,
) -> Result<()> {
    if building.is_some() && kind != EntityKind::Room {
        bail!("--building only applies to rooms");
    }

    let mut list = ListController::new(kind, ctx.page_size());
    if let Some(notice) = list.load(&ctx.api).await {
        bail!(notice.text);
    }
    list.set_building_filter(building);
    if let Some(query) = search {
        list.set_search(query);
    }
    list.go_to(page)?;

    if json {
        let rows: Vec<_> = list.visible().into_iter().cloned().map(|r| r.into_value()).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if list.filtered_len() == 0 {
        println!("No {} found", kind.plural_name().to_lowercase());
        return Ok(());
    }

    println!("{}", output::list_table(&list));
    println!();
    println!("{}", output::page_footer(&list).dimmed());
    Ok(())
}

async fn show(ctx: &Ctx, kind: EntityKind, id: RecordId, json: bool) -> Result<()> {
    let record = ctx
        .api
        .get_by_id(kind, id)
        .await?
        .ok_or(ConsoleError::RecordNotFound { entity: kind, id })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record.into_value())?);
    } else {
        println!("{}", output::record_details(&record));
    }
    Ok(())
}

async fn toggle(ctx: &Ctx, kind: EntityKind, id: RecordId, yes: bool) -> Result<()> {
    let current = ctx.api.get_by_id(kind, id).await?;

    let mut gate = StatusToggle::new();
    gate.request(id)?;

    if !yes && !confirm(&confirm_prompt(kind, current.as_ref()))? {
        gate.cancel();
        println!("Cancelled");
        return Ok(());
    }

    let outcome = gate.confirm_and_send(&ctx.api, kind).await?;
    let mut records: Vec<_> = current.into_iter().collect();
    let notice = reduce(&mut records, &outcome);
    if !outcome.is_success() {
        bail!(notice.text);
    }

    output::print_notice(&notice);
    if let Some(record) = records.first() {
        println!("  {} #{} is now {}", kind, id, output::status_text(record));
    }
    Ok(())
}

/// Ask a yes/no question on the terminal; anything but `y` declines
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

// ============================================================================
// Forms
// ============================================================================

async fn update(
    ctx: &Ctx,
    kind: EntityKind,
    id: RecordId,
    fields: Vec<(String, String)>,
    old_password: Option<String>,
    new_password: Option<String>,
) -> Result<()> {
    let mut form = FormController::new(kind, FormMode::Edit(id));
    match fetch_for_edit(&ctx.api, kind, id).await {
        PrefillOutcome::Loaded(record) => form.prefill(record),
        PrefillOutcome::Missing { notice, .. } => bail!(notice.text),
    }
    apply_fields(&mut form, &fields)?;

    if old_password.is_some() || new_password.is_some() {
        if !form.offers_password_change() {
            bail!("Password change is only available when updating a user");
        }
        form.set_password_enabled(true);
        form.set_old_password(old_password.unwrap_or_default());
        form.set_new_password(new_password.unwrap_or_default());
    }

    save(ctx, form).await
}

/// Copy `key=value` arguments into a form, rejecting keys it does not have
pub fn apply_fields(form: &mut FormController, fields: &[(String, String)]) -> Result<()> {
    for (key, value) in fields {
        let Some(spec) = form.fields().iter().find(|f| f.key == key.as_str()) else {
            let known: Vec<&str> = form.fields().iter().map(|f| f.key).collect();
            bail!(
                "Unknown field '{}' for {}; expected one of: {}",
                key,
                form.kind(),
                known.join(", ")
            );
        };
        form.set(spec.key, value.clone());
    }
    Ok(())
}

async fn save(ctx: &Ctx, form: FormController) -> Result<()> {
    // The terminal has no page to linger on, so no redirect delay.
    match submit(&ctx.api, &ctx.session, &form, Duration::ZERO).await {
        SubmitOutcome::Saved { notice, .. } => {
            output::print_notice(&notice);
            Ok(())
        }
        SubmitOutcome::Invalid(report) => {
            output::print_field_errors(&report.errors);
            bail!("Validation failed");
        }
        SubmitOutcome::Failed(notice) => bail!(notice.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_apply_fields_sets_values() {
        let mut form = FormController::new(EntityKind::Building, FormMode::Create);
        apply_fields(&mut form, &pairs(&[("name", "Tower A")])).unwrap();
        assert_eq!(form.values().get("name"), "Tower A");
    }

    #[test]
    fn test_apply_fields_rejects_unknown_key() {
        let mut form = FormController::new(EntityKind::Building, FormMode::Create);
        let err = apply_fields(&mut form, &pairs(&[("colour", "blue")])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Unknown field 'colour'"));
        assert!(message.contains("name"));
    }

    #[test]
    fn test_apply_fields_last_value_wins() {
        let mut form = FormController::new(EntityKind::Building, FormMode::Create);
        apply_fields(&mut form, &pairs(&[("name", "A"), ("name", "B")])).unwrap();
        assert_eq!(form.values().get("name"), "B");
    }
}
