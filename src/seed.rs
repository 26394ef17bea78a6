use anyhow::Context;
use chrono::{Duration, Local};
use tracing::info;

use crate::models::{Admin, Organizer, Student, Venue};
use crate::AppState;

/// Демо-данные для dev-окружения: пара площадок, студенты, организатор,
/// админ и несколько событий. Идентификаторы пишем в лог, чтобы можно
/// было сразу ходить в API заголовками X-Student-Id / X-Organizer-Id.
pub async fn load_demo_data(state: &AppState) -> anyhow::Result<()> {
    let venues = [Venue::new("Main Hall", 300), Venue::new("Library Atrium", 60)];
    let students = [
        Student::new("Aruzhan", "aruzhan@univ.kz"),
        Student::new("Dias", "dias@univ.kz"),
        Student::new("Madina", "madina@univ.kz"),
    ];
    let organizer = Organizer::new("Student Union", "union@univ.kz");
    let admin = Admin::new("Dean's office");

    {
        let mut db = state.store.write().await;
        for v in &venues {
            db.venues.insert(v.id, v.clone());
        }
        for s in &students {
            db.students.insert(s.id, s.clone());
        }
        db.organizers.insert(organizer.id, organizer.clone());
        db.admins.insert(admin.id, admin.clone());
    }

    let now = Local::now().naive_local();
    let opening = state
        .catalog
        .create_event(
            organizer.id,
            "Semester opening",
            "Welcome talks and free pizza",
            now + Duration::hours(6),
            venues[0].id,
            250,
        )
        .await
        .context("seed: semester opening")?;
    let workshop = state
        .catalog
        .create_event(
            organizer.id,
            "Rust workshop",
            "Hands-on intro, bring a laptop",
            now + Duration::days(3),
            venues[1].id,
            30,
        )
        .await
        .context("seed: rust workshop")?;

    info!("demo venues: {} / {}", venues[0].id, venues[1].id);
    for s in &students {
        info!("demo student {}: {}", s.name, s.id);
    }
    info!("demo organizer: {}", organizer.id);
    info!("demo admin: {}", admin.id);
    info!("demo events: {} / {}", opening.id, workshop.id);

    Ok(())
}
