use crate::events::LibraryEvent;

/// Trait for catalogue event observation
pub trait LibraryObserver {
    /// Called after an event has been committed to both indexes
    fn on_event(&self, event: &LibraryEvent);
}

/// Logs every event that occurs in the catalogue
#[derive(Debug)]
pub struct EventLogger;

impl LibraryObserver for EventLogger {
    fn on_event(&self, event: &LibraryEvent) {
        println!("LOGGER: {event}");
    }
}

/// Sends notifications to patrons affected by an event
#[derive(Debug)]
pub struct NotificationService;

impl LibraryObserver for NotificationService {
    fn on_event(&self, event: &LibraryEvent) {
        match event {
            LibraryEvent::HandedOver { isbn, patron } => {
                println!("NOTIFICATION: {patron}, book {isbn} is now checked out to you!");
            }
            LibraryEvent::Waitlisted { isbn, patron, position } => {
                println!("NOTIFICATION: {patron}, you are number {position} in line for {isbn}.");
            }
            _ => {}
        }
    }
}
