use crate::cli::opt::{EditModule, ModuleAction, Modules};
use crate::cli::prompt;
use anyhow::{Error, bail};
use kimyo_client::{ContentApi, ContentClient};
use kimyo_cms::{Decision, LastSelection, ModuleEditor, ModuleStore, SelectionFile};
use kimyo_model::icon;
use kimyo_model::{Module, NewModule};

pub(crate) async fn modules(
    client: &ContentClient,
    selection: &SelectionFile,
    opt: Modules,
    assume_yes: bool,
) -> Result<(), Error> {
    let mut store = ModuleStore::new(opt.grade);
    store.load(client).await?;

    match opt.action {
        ModuleAction::List { filter } => {
            if let Some(filter) = filter {
                store.set_filter(filter);
            }
            let hint = selection.load();
            for module in store.visible() {
                let marker = if module.id.is_some() && module.id == hint.module_id {
                    '*'
                } else {
                    ' '
                };
                let icon = module.icon.as_deref().map_or(&icon::FALLBACK, icon::resolve);
                println!(
                    "{marker} {:>4}  {}  {:<24} {}{}",
                    module.id.unwrap_or_default(),
                    icon.glyph,
                    module.slug,
                    module.title,
                    if module.active { "" } else { "  (inactive)" },
                );
            }
        }
        ModuleAction::Add(args) => {
            let mut draft = Module::draft(args.slug, opt.grade, args.title);
            draft.description = args.description;
            draft.icon = args.icon;
            draft.color = args.color;
            draft.active = !args.inactive;

            let added = store.add(client, NewModule::from(&draft)).await?;
            println!(
                "created module {} ({})",
                added.id.unwrap_or_default(),
                added.slug
            );
            selection.store(LastSelection {
                module_id: added.id,
                topic_id: None,
            })?;
        }
        ModuleAction::Edit(args) => edit(client, selection, &mut store, args, assume_yes).await?,
        ModuleAction::Delete { id } => {
            let dialog = store.request_delete(id)?;
            match prompt::confirm(&dialog, assume_yes)? {
                Decision::Confirmed => {
                    let removed = store.confirm_delete(client).await?;
                    println!("deleted \"{}\"", removed.title);
                    if selection.load().module_id == Some(id) {
                        selection.clear()?;
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
    store: &mut ModuleStore,
    args: EditModule,
    assume_yes: bool,
) -> Result<(), Error> {
    let module = store.select(args.id)?.clone();
    let topics = client.list_topics(&module.slug).await?;
    let mut editor = ModuleEditor::new(module, topics);
    editor.begin_edit()?;

    {
        let draft = editor.module_mut()?;
        if let Some(title) = args.title {
            draft.title = title;
        }
        if let Some(description) = args.description {
            draft.description = Some(description);
        }
        if let Some(icon) = args.icon {
            draft.icon = Some(icon);
        }
        if let Some(color) = args.color {
            draft.color = Some(color);
        }
        if let Some(active) = args.active {
            draft.active = active;
        }
    }
    for id in args.drop_topics {
        if !editor.mark_topic_for_deletion(id) {
            bail!("topic {id} does not belong to this module");
        }
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
                module_id: Some(args.id),
                topic_id: None,
            })?;
        }
        Decision::Dismissed => {
            editor.dismiss_confirm()?;
            editor.cancel()?;
            println!("aborted");
        }
    }
    Ok(())
}
