//! Then steps for task management BDD scenarios.

use super::world::{TaskWorld, run_async};
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;
use tasklist::task::{
    domain::{PageRequest, Task, TaskStatus},
    services::TaskServiceError,
};

fn created_task(world: &TaskWorld) -> Result<&Task, eyre::Report> {
    world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre!("missing create result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre!("unexpected task creation failure: {err}"))
}

#[then("the created task is pending")]
fn created_task_is_pending(world: &TaskWorld) -> Result<(), eyre::Report> {
    let task = created_task(world)?;
    if task.status() != TaskStatus::Pending {
        return Err(eyre!("expected pending status, found {}", task.status()));
    }
    if task.created_at() != task.updated_at() {
        return Err(eyre!(
            "expected created_at and updated_at timestamps to match at creation"
        ));
    }
    Ok(())
}

#[then("the created task can be fetched by its id")]
fn created_task_is_fetchable(world: &TaskWorld) -> Result<(), eyre::Report> {
    let created = created_task(world)?;
    let id = world.current_task()?;
    let fetched = run_async(world.service.get(id)).wrap_err("fetch created task")?;
    if &fetched != created {
        return Err(eyre!("fetched task does not match created task"));
    }
    Ok(())
}

#[then("the task is done")]
fn task_is_done(world: &TaskWorld) -> Result<(), eyre::Report> {
    let task = world
        .last_update_result
        .as_ref()
        .ok_or_else(|| eyre!("missing update result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre!("unexpected update failure: {err}"))?;
    if task.status() != TaskStatus::Done {
        return Err(eyre!("expected done status, found {}", task.status()));
    }
    Ok(())
}

#[then(r#"the task keeps title "{title}" and description "{description}""#)]
fn task_keeps_text(
    world: &TaskWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let id = world.current_task()?;
    let stored = run_async(world.service.get(id)).wrap_err("fetch updated task")?;
    if stored.title().as_str() != title {
        return Err(eyre!("expected title {title}, found {}", stored.title()));
    }
    let stored_description = stored.description().map(|value| value.as_str());
    if stored_description != Some(description.as_str()) {
        return Err(eyre!(
            "expected description {description}, found {stored_description:?}"
        ));
    }
    Ok(())
}

#[then("creation fails with an invalid argument error")]
fn creation_fails_with_invalid_argument(world: &TaskWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre!("missing create result in scenario world"))?;
    if !matches!(result, Err(TaskServiceError::InvalidArgument(_))) {
        return Err(eyre!("expected invalid argument error, found {result:?}"));
    }
    Ok(())
}

#[then("the task list is empty")]
fn task_list_is_empty(world: &TaskWorld) -> Result<(), eyre::Report> {
    let page = run_async(world.service.list(&PageRequest::default(), None))
        .wrap_err("list tasks")?;
    if page.total_elements() != 0 {
        return Err(eyre!(
            "expected no stored tasks, found {}",
            page.total_elements()
        ));
    }
    Ok(())
}

#[then("{count:u64} tasks are returned")]
fn tasks_are_returned(world: &TaskWorld, count: u64) -> Result<(), eyre::Report> {
    let page = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre!("missing page in scenario world"))?;
    let returned = u64::try_from(page.content().len()).wrap_err("page length")?;
    if returned != count || page.total_elements() != count {
        return Err(eyre!(
            "expected {count} tasks, found {returned} of {}",
            page.total_elements()
        ));
    }
    Ok(())
}

#[then("{count:u64} tasks are counted across {pages:u64} pages")]
fn tasks_counted_across_pages(
    world: &TaskWorld,
    count: u64,
    pages: u64,
) -> Result<(), eyre::Report> {
    let page = world
        .last_page
        .as_ref()
        .ok_or_else(|| eyre!("missing page in scenario world"))?;
    if page.total_elements() != count || page.total_pages() != pages {
        return Err(eyre!(
            "expected {count} tasks over {pages} pages, found {} over {}",
            page.total_elements(),
            page.total_pages()
        ));
    }
    Ok(())
}

#[then("fetching the task fails with not found")]
fn fetch_fails_with_not_found(world: &TaskWorld) -> Result<(), eyre::Report> {
    world
        .last_delete_result
        .as_ref()
        .ok_or_else(|| eyre!("missing delete result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre!("unexpected delete failure: {err}"))?;
    let id = world.current_task()?;
    let result = run_async(world.service.get(id));
    if !matches!(result, Err(TaskServiceError::NotFound(_))) {
        return Err(eyre!("expected not found, found {result:?}"));
    }
    Ok(())
}

#[then("deleting the task again fails with not found")]
fn second_delete_fails(world: &TaskWorld) -> Result<(), eyre::Report> {
    let id = world.current_task()?;
    let result = run_async(world.service.delete(id));
    if !matches!(result, Err(TaskServiceError::NotFound(_))) {
        return Err(eyre!("expected not found, found {result:?}"));
    }
    Ok(())
}
