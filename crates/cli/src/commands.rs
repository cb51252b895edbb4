//! One function per subcommand, generic over the record type.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, bail};

use shopadmin_catalog::dispatch_kind;
use shopadmin_client::{ClientConfig, FilePart, HttpClient, ListQuery};
use shopadmin_console::{
    ConfirmationGate, DeleteTarget, FormController, Notifier, ResourceScreen, StatusCounts, StatusFilter, fetch_counts,
    load_category, load_one,
};
use shopadmin_core::{ApiError, Editable, Resource, ResourceId, StatusKind};

use crate::args::{Command, FieldArgs, ListArgs};
use crate::output::{self, StderrNotifier};

/// Everything a command needs to talk to the API.
pub struct Context {
    pub api: Arc<HttpClient>,
    pub notifier: Arc<dyn Notifier>,
    pub page_size: u32,
    /// Skip interactive confirmation.
    pub assume_yes: bool,
}

impl Context {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let page_size = config.page_size;
        let api = HttpClient::new(config).context("building HTTP client")?;
        Ok(Self {
            api: Arc::new(api),
            notifier: Arc::new(StderrNotifier),
            page_size,
            assume_yes: false,
        })
    }

    fn screen<R: Resource>(&self) -> ResourceScreen<R, HttpClient> {
        ResourceScreen::new(Arc::clone(&self.api), Arc::clone(&self.notifier))
    }
}

pub async fn run(ctx: &Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List(args) => dispatch_kind!(args.resource, R => list::<R>(ctx, &args).await),
        Command::Show { resource, id } => dispatch_kind!(resource, R => show::<R>(ctx, id).await),
        Command::Counts { resource, from_list } => dispatch_kind!(resource, R => counts::<R>(ctx, from_list).await),
        Command::Delete { resource, id, yes } => {
            dispatch_kind!(resource, R => delete::<R>(ctx, id, yes || ctx.assume_yes).await)
        }
        Command::BulkDelete { resource, ids, yes } => {
            dispatch_kind!(resource, R => bulk_delete::<R>(ctx, &ids, yes || ctx.assume_yes).await)
        }
        Command::SetStatus { resource, id, status } => {
            dispatch_kind!(resource, R => set_status::<R>(ctx, id, &status).await)
        }
        Command::Create { resource, fields } => dispatch_kind!(resource, R => submit::<R>(ctx, None, &fields).await),
        Command::Update { resource, id, fields } => {
            dispatch_kind!(resource, R => submit::<R>(ctx, Some(id), &fields).await)
        }
        Command::Subcategories { category_id } => subcategories(ctx, category_id).await,
    }
}

/// Operator-facing message on top, the typed error underneath.
fn api_failure(err: ApiError, fallback: &str) -> anyhow::Error {
    let message = err.user_message(fallback);
    anyhow::Error::new(err).context(message)
}

async fn list<R: Resource>(ctx: &Context, args: &ListArgs) -> anyhow::Result<()> {
    let status = match args.status.as_deref() {
        Some(raw) => StatusFilter::<R::Status>::parse(raw)?,
        None => StatusFilter::All,
    };

    let mut query = ListQuery::new()
        .page(args.page.unwrap_or(1))
        .limit(args.limit.unwrap_or(ctx.page_size));
    if let StatusFilter::Only(s) = status {
        query = query.status(s.as_str());
    }
    if let Some(category) = &args.category {
        query = query.category(category.clone());
    }
    if let Some(subcategory) = &args.subcategory {
        query = query.subcategory(subcategory.clone());
    }

    let mut screen = ctx.screen::<R>();
    screen.load(query).await;
    if let Some(error) = &screen.list().state().error {
        bail!("{error}");
    }

    let filter = screen.filter_mut();
    filter.status = status;
    filter.search = args.search.clone().unwrap_or_default();
    filter.category = args.category.clone();
    filter.subcategory = args.subcategory.clone();

    let mut out = io::stdout().lock();
    let visible = screen.visible();
    output::print_rows(&mut out, visible.iter().copied())?;
    let state = screen.list().state();
    writeln!(
        out,
        "{} of {} {} (page {} of {})",
        visible.len(),
        state.total_count,
        R::KIND.plural_label(),
        state.current_page,
        state.total_pages.max(1)
    )?;
    Ok(())
}

async fn show<R: Resource>(ctx: &Context, id: ResourceId) -> anyhow::Result<()> {
    let record: R = load_one(&*ctx.api, id)
        .await
        .map_err(|e| api_failure(e, &format!("Failed to fetch {}", R::KIND.label())))?;
    output::print_json(&mut io::stdout().lock(), &record)?;
    Ok(())
}

async fn counts<R: Resource>(ctx: &Context, from_list: bool) -> anyhow::Result<()> {
    let counts: StatusCounts<R::Status> = if from_list {
        let mut screen = ctx.screen::<R>();
        screen.load(ListQuery::new()).await;
        if let Some(error) = &screen.list().state().error {
            bail!("{error}");
        }
        screen.count_from_list().clone()
    } else {
        fetch_counts::<R, HttpClient>(Arc::clone(&ctx.api)).await
    };
    output::print_counts(&mut io::stdout().lock(), &counts)?;
    Ok(())
}

/// Run the confirmation gate for `target`; `false` when the operator declines.
fn confirm_target<R: Resource>(target: DeleteTarget, assume_yes: bool) -> anyhow::Result<bool> {
    let mut gate = ConfirmationGate::new(R::KIND);
    let Some(prompt) = gate.request(target) else {
        return Ok(false);
    };
    if assume_yes || output::confirm(&prompt, &mut io::stdin().lock())? {
        Ok(gate.begin_confirm().is_some())
    } else {
        gate.cancel();
        eprintln!("Cancelled.");
        Ok(false)
    }
}

async fn delete<R: Resource>(ctx: &Context, id: ResourceId, assume_yes: bool) -> anyhow::Result<()> {
    let record: R = load_one(&*ctx.api, id)
        .await
        .map_err(|e| api_failure(e, &format!("Failed to fetch {}", R::KIND.label())))?;
    let target = DeleteTarget::One { id, name: record.display_name().to_string() };
    if !confirm_target::<R>(target, assume_yes)? {
        return Ok(());
    }

    let mut screen = ctx.screen::<R>();
    // The screen has already notified; only the exit status is left.
    screen
        .delete(id)
        .await
        .map_err(|e| api_failure(e, &format!("Failed to delete {}", R::KIND.label())))
}

async fn bulk_delete<R: Resource>(ctx: &Context, ids: &[ResourceId], assume_yes: bool) -> anyhow::Result<()> {
    if !confirm_target::<R>(DeleteTarget::Many(ids.to_vec()), assume_yes)? {
        return Ok(());
    }
    let mut screen = ctx.screen::<R>();
    let deleted = screen
        .bulk_delete(ids)
        .await
        .map_err(|e| api_failure(e, &format!("Failed to delete {}", R::KIND.plural_label())))?;
    writeln!(io::stdout().lock(), "{deleted}")?;
    Ok(())
}

async fn set_status<R: Resource>(ctx: &Context, id: ResourceId, raw: &str) -> anyhow::Result<()> {
    let status = R::Status::parse(raw)?;
    let mut screen = ctx.screen::<R>();
    let record = screen
        .set_status(id, status)
        .await
        .map_err(|e| api_failure(e, &format!("Failed to update {}", R::KIND.label())))?;
    writeln!(io::stdout().lock(), "{}", output::row(&record))?;
    Ok(())
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

async fn read_file_part(path: &Path) -> anyhow::Result<FilePart> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    Ok(FilePart::new(file_name, content_type_for(path), bytes))
}

/// Create (`id = None`) or update a record from command-line fields.
async fn submit<R: Editable>(ctx: &Context, id: Option<ResourceId>, args: &FieldArgs) -> anyhow::Result<()> {
    let mut form = FormController::<R>::create();
    if let Some(id) = id {
        form.load_one(&*ctx.api, id)
            .await
            .map_err(|e| api_failure(e, &format!("Failed to fetch {}", R::KIND.label())))?;
    }

    for (key, value) in &args.fields {
        form.draft_mut().set_from_str(key, value)?;
    }
    for (key, path) in &args.files {
        let file = read_file_part(path).await?;
        form.draft_mut().attach(key, file)?;
    }

    match form.submit(&*ctx.api, ctx.notifier.as_ref()).await {
        Ok(outcome) => {
            let mut out = io::stdout().lock();
            output::print_json(&mut out, &outcome.record)?;
            tracing::debug!(route = %outcome.route, "next view");
            Ok(())
        }
        Err(ApiError::Validation(errors)) => {
            eprintln!("{} form has errors:", R::KIND.title());
            output::print_field_errors(&errors);
            bail!("validation failed for {} field(s)", errors.len())
        }
        Err(err) => {
            let verb = if id.is_some() { "update" } else { "create" };
            Err(api_failure(err, &format!("Failed to {verb} {}", R::KIND.label())))
        }
    }
}

async fn subcategories(ctx: &Context, category_id: ResourceId) -> anyhow::Result<()> {
    let detail = load_category(&*ctx.api, &*ctx.api, category_id)
        .await
        .map_err(|e| api_failure(e, "Failed to fetch category"))?;

    let mut out = io::stdout().lock();
    writeln!(out, "{}", output::row(&detail.parent))?;
    for sub in &detail.children {
        writeln!(out, "  {}", output::row(sub))?;
    }
    writeln!(out, "{} {}", detail.children.len(), shopadmin_core::ResourceKind::SubCategory.plural_label())?;
    Ok(())
}
