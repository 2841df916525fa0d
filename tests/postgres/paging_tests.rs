//! Filtered and ordered page queries against a real `PostgreSQL` database.

use crate::postgres::helpers::{BoxError, RepositoryContext, new_task, repository_context};
use rstest::rstest;
use tasklist::task::{
    domain::{PageRequest, SortDirection, Task, TaskSort, TaskSortField, TaskStatus},
    ports::TaskRepository,
};

fn seed(context: &RepositoryContext, tasks: &[(&str, TaskStatus)]) -> Result<(), BoxError> {
    for &(title, status) in tasks {
        context
            .rt
            .block_on(context.repository.save(&new_task(title, None, status)?))?;
    }
    Ok(())
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}

#[rstest]
#[case(TaskStatus::Pending, 1, &["a"])]
#[case(TaskStatus::Done, 2, &["b", "c"])]
fn status_filter_applies_to_rows_and_totals(
    repository_context: Result<RepositoryContext, BoxError>,
    #[case] status: TaskStatus,
    #[case] expected_total: u64,
    #[case] expected_titles: &[&str],
) -> Result<(), BoxError> {
    let context = repository_context?;
    seed(
        &context,
        &[
            ("a", TaskStatus::Pending),
            ("b", TaskStatus::Done),
            ("c", TaskStatus::Done),
        ],
    )?;

    let page = context.rt.block_on(
        context
            .repository
            .find_page_by_status(&PageRequest::default(), status),
    )?;

    assert_eq!(page.total_elements(), expected_total);
    assert_eq!(page.total_pages(), 1);
    assert_eq!(titles(page.content()), expected_titles);
    assert!(page.content().iter().all(|task| task.status() == status));
    Ok(())
}

#[rstest]
fn unfiltered_pages_do_not_overlap(
    repository_context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let context = repository_context?;
    seed(
        &context,
        &[
            ("a", TaskStatus::Pending),
            ("b", TaskStatus::Done),
            ("c", TaskStatus::Done),
        ],
    )?;

    let first = context
        .rt
        .block_on(context.repository.find_page(&PageRequest::new(0, 2)?))?;
    let second = context
        .rt
        .block_on(context.repository.find_page(&PageRequest::new(1, 2)?))?;

    assert_eq!(titles(first.content()), ["a", "b"]);
    assert_eq!(titles(second.content()), ["c"]);
    assert_eq!(second.total_elements(), 3);
    assert_eq!(second.total_pages(), 2);
    assert!(second.is_last());
    Ok(())
}

#[rstest]
fn equal_sort_keys_fall_back_to_ascending_id(
    repository_context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let context = repository_context?;
    seed(
        &context,
        &[
            ("b", TaskStatus::Pending),
            ("same", TaskStatus::Done),
            ("same", TaskStatus::Pending),
            ("a", TaskStatus::Done),
        ],
    )?;
    let request = PageRequest::new(0, 10)?
        .with_sort(TaskSort::new(TaskSortField::Title, SortDirection::Desc));

    let page = context.rt.block_on(context.repository.find_page(&request))?;

    assert_eq!(titles(page.content()), ["same", "same", "b", "a"]);
    let ids: Vec<_> = page.content().iter().filter_map(Task::id).collect();
    assert!(ids.first() < ids.get(1));
    Ok(())
}

#[rstest]
fn page_past_the_end_is_empty_but_counted(
    repository_context: Result<RepositoryContext, BoxError>,
) -> Result<(), BoxError> {
    let context = repository_context?;
    seed(&context, &[("only", TaskStatus::Done)])?;

    let page = context.rt.block_on(
        context
            .repository
            .find_page_by_status(&PageRequest::new(3, 5)?, TaskStatus::Done),
    )?;

    assert!(page.content().is_empty());
    assert_eq!(page.total_elements(), 1);
    Ok(())
}
