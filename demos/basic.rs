use casebook::models::{Case, CaseDetails, CasePatch, CaseStatus, LossType, User};
use casebook::{Patch, RecordStore, Storage, StoreConfig};

fn main() -> Result<(), casebook::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casebook=debug".into()),
        )
        .init();

    let dir = std::env::temp_dir().join("casebook_example_basic");
    let storage = Storage::open(StoreConfig::local(&dir))?;

    // register, unless the email is taken
    let email = "asha@example.com";
    let user = match storage.user_by_email(email)? {
        Some(u) => u,
        None => storage.users.create(User::new(email, "<hash>", "Asha", "+91 9876543210"))?,
    };

    // submit a case
    let case = Case::submit(
        user.id.clone(),
        CaseDetails {
            company_name: "Acme Retail".into(),
            domain: "E-commerce".into(),
            incident_date: "2024-03-01".into(),
            description: "Paid for an order that never shipped.".into(),
            loss_types: vec![LossType::Money, LossType::Time],
            monetary_loss: Some(2499.0),
            contact_name: user.name.clone(),
            contact_email: user.email.clone(),
            contact_phone: user.phone.clone(),
        },
    )?;
    let case = storage.submit_case(case)?;
    println!("submitted {} ({})", case.id, case.status);

    // move it along the workflow
    let patch = Patch::from_fields(&CasePatch::status(CaseStatus::UnderReview))?;
    let id = case.id.clone();
    if let Some(updated) = storage.cases.update(&|c: &Case| c.id == id, &patch)? {
        println!("now {}", updated.status);
    }

    for c in storage.cases_for_user(&user.id)? {
        println!("case {} for {}: {}", c.id, c.company_name, c.status);
    }
    for u in storage.updates_for_case(&case.id)? {
        println!("  [{}] {}", u.created_at, u.message);
    }
    println!("channel: {}", storage.channel_config()?.channel_url);

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
