//! Given steps for task management BDD scenarios.

use super::world::{TaskWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use tasklist::task::{domain::TaskStatus, services::CreateTaskRequest};

#[given("an empty task list")]
fn empty_task_list(world: &mut TaskWorld) {
    world.current_task = None;
}

#[given(r#"a task titled "{title}" with description "{description}""#)]
fn existing_task(
    world: &mut TaskWorld,
    title: String,
    description: String,
) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .service
            .create(CreateTaskRequest::new(title).with_description(description)),
    )
    .wrap_err("create task for scenario")?;
    world.current_task = created.id();
    Ok(())
}

#[given(r#"tasks with statuses "{statuses}""#)]
fn tasks_with_statuses(world: &mut TaskWorld, statuses: String) -> Result<(), eyre::Report> {
    for (index, raw) in statuses.split(',').enumerate() {
        let status = TaskStatus::try_from(raw).wrap_err("parse scenario status")?;
        let request = CreateTaskRequest::new(format!("task {index}")).with_status(status);
        run_async(world.service.create(request)).wrap_err("seed task for scenario")?;
    }
    Ok(())
}
