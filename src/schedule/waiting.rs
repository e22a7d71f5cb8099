use tracing::info;

use super::types::{Appointment, Comment, Direction, Partition, Snapshot};
use crate::error::{InvalidState, SchedulingError, SchedulingResult};

/// Swaps a waiting entry with its neighbour in the given direction.
///
/// Both list positions and `sort_order` values are exchanged, so the
/// waiting list stays sorted by rank.
pub fn move_waiting_entry(snapshot: &Snapshot, id: &str, direction: Direction) -> SchedulingResult<Snapshot> {
    match snapshot.locate(id) {
        None => return Err(SchedulingError::not_found(id)),
        Some(Partition::Waiting) => {}
        Some(_) => return Err(InvalidState::NotWaiting.into()),
    }

    let mut next = snapshot.clone().normalized();
    let index = next
        .waiting
        .iter()
        .position(|a| a.id == id)
        .ok_or_else(|| SchedulingError::not_found(id))?;

    let other = match direction {
        Direction::Forward => index.checked_sub(1).ok_or(InvalidState::AlreadyFirst)?,
        Direction::Backward => {
            if index + 1 >= next.waiting.len() {
                return Err(InvalidState::AlreadyLast.into());
            }
            index + 1
        }
    };

    let rank = next.waiting[index].sort_order;
    next.waiting[index].sort_order = next.waiting[other].sort_order;
    next.waiting[other].sort_order = rank;
    next.waiting.swap(index, other);

    info!(id, ?direction, "pub moved");
    Ok(next)
}

/// Appends an entry to the end of the waiting list
pub fn append_waiting_entry(snapshot: &Snapshot, mut appointment: Appointment) -> Snapshot {
    let mut next = snapshot.clone().normalized();
    appointment.sort_order = next.waiting.iter().map(|a| a.sort_order).max().map_or(1, |max| max + 1);
    appointment.scheduled_date = None;
    appointment.removed = None;

    info!(id = %appointment.id, name = %appointment.name, sort_order = appointment.sort_order, "pub entered");
    next.waiting.push(appointment);
    next
}

/// Moves a live appointment to the removed partition, stamped with `provenance`
pub fn soft_delete(snapshot: &Snapshot, id: &str, provenance: &str) -> SchedulingResult<Snapshot> {
    let mut next = snapshot.clone().normalized();

    let mut live = None;
    for list in [&mut next.waiting, &mut next.current, &mut next.archive] {
        if let Some(index) = list.iter().position(|a| a.id == id) {
            live = Some(list.remove(index));
            break;
        }
    }
    let mut removed = live.ok_or_else(|| SchedulingError::not_found(id))?;
    removed.removed = Some(provenance.to_string());

    info!(id, "pub deleted");
    next.removed.push(removed);
    Ok(next)
}

/// Appends a comment to any live appointment, archived ones included
pub fn append_comment(snapshot: &Snapshot, id: &str, comment: Comment) -> SchedulingResult<Snapshot> {
    let mut next = snapshot.clone().normalized();
    let target = next
        .waiting
        .iter_mut()
        .chain(next.current.iter_mut())
        .chain(next.archive.iter_mut())
        .find(|a| a.id == id)
        .ok_or_else(|| SchedulingError::not_found(id))?;

    target.comments.push(comment);
    info!(id, "comment entered");
    Ok(next)
}
