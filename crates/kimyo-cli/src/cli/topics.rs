use crate::cli::opt::{EditTopic, TopicAction, Topics};
use crate::cli::prompt;
use anyhow::{Error, bail};
use kimyo_client::{ContentApi, ContentClient};
use kimyo_cms::{Decision, LastSelection, SelectionFile, TopicEditor, TopicStore};
use kimyo_http::FilePart;
use kimyo_model::blocks::BlockDocument;
use kimyo_model::{Grade, Module};
use std::ffi::OsStr;
use std::path::Path;

pub(crate) async fn topics(
    client: &ContentClient,
    selection: &SelectionFile,
    opt: Topics,
    assume_yes: bool,
) -> Result<(), Error> {
    let module = find_module(client, &opt.module).await?;
    let module_id = module.id;
    let mut store = TopicStore::new(&module)?;
    store.load(client).await?;

    match opt.action {
        TopicAction::List { filter } => {
            if let Some(filter) = filter {
                store.set_filter(filter);
            }
            let hint = selection.load();
            for topic in store.visible() {
                let marker = if topic.id.is_some() && topic.id == hint.topic_id {
                    '*'
                } else {
                    ' '
                };
                println!(
                    "{marker} {:>4}  #{:<3} {}",
                    topic.id.unwrap_or_default(),
                    topic.order_in_module,
                    topic.title,
                );
            }
        }
        TopicAction::Add { title, description } => {
            let added = store.add(client, title, description).await?;
            println!("created topic {}", added.id.unwrap_or_default());
            selection.store(LastSelection {
                module_id,
                topic_id: added.id,
            })?;
        }
        TopicAction::Edit(args) => {
            edit(client, selection, &mut store, module_id, args, assume_yes).await?;
        }
        TopicAction::Delete { id } => {
            let dialog = store.request_delete(id)?;
            match prompt::confirm(&dialog, assume_yes)? {
                Decision::Confirmed => {
                    let removed = store.confirm_delete(client).await?;
                    println!("deleted \"{}\"", removed.title);
                    if selection.load().topic_id == Some(id) {
                        selection.store(LastSelection {
                            module_id,
                            topic_id: None,
                        })?;
                    }
                }
                Decision::Dismissed => {
                    store.dismiss_delete();
                    println!("aborted");
                }
            }
        }
    }
    Ok(())
}

async fn edit(
    client: &ContentClient,
    selection: &SelectionFile,
    store: &mut TopicStore,
    module_id: Option<i64>,
    args: EditTopic,
    assume_yes: bool,
) -> Result<(), Error> {
    let topic = store.select(args.id)?.clone();
    let mut editor = TopicEditor::open(topic);

    if let Some(title) = args.title {
        editor.set_title(title);
    }
    if let Some(description) = args.description {
        editor.set_description(Some(description));
    }
    if let Some(order) = args.order {
        editor.set_order(order);
    }
    if let Some(path) = args.content_file {
        let raw = std::fs::read_to_string(&path)?;
        match BlockDocument::parse(&raw) {
            Ok(document) => *editor.document_mut() = document,
            Err(err) => bail!("{} is not a block document: {err}", path.display()),
        }
    }
    if let Some(path) = args.attach_image {
        let part = file_part(&path)?;
        let url = editor.attach_image(client, part, &args.caption).await?;
        println!("uploaded {url}");
    }

    if !editor.is_dirty() {
        println!("nothing to change");
        return Ok(());
    }

    let dialog = editor.request_save()?;
    match prompt::confirm(&dialog, assume_yes)? {
        Decision::Confirmed => {
            let saved = editor.confirm_save(client).await?;
            store.apply_saved(saved);
            if let Some(notice) = editor.take_notice() {
                println!("{}", notice.message);
            }
            selection.store(LastSelection {
                module_id,
                topic_id: Some(args.id),
            })?;
        }
        Decision::Dismissed => {
            editor.dismiss_confirm()?;
            editor.cancel();
            println!("aborted");
        }
    }
    Ok(())
}

fn file_part(path: &Path) -> Result<FilePart, Error> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or("asset.bin")
        .to_owned();
    let mime = match path.extension().and_then(OsStr::to_str) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
    .to_owned();
    Ok(FilePart {
        file_name,
        mime,
        bytes,
    })
}

async fn find_module(client: &ContentClient, slug: &str) -> Result<Module, Error> {
    for grade in [Grade::Ten, Grade::Eleven] {
        let found = client
            .list_modules(grade)
            .await?
            .into_iter()
            .find(|m| m.slug == slug);
        if let Some(found) = found {
            return Ok(found);
        }
    }
    bail!("no module with slug \"{slug}\"")
}
