// FICHIER : provisioner/src/catalog/builtin.rs

use super::{AttributeSpec as A, Catalog, CollectionSpec};

/// Schéma de l'application CleanNote (équipes, tâches, abonnements, photos).
///
/// NB : `payments.amount` est stocké en string, comme dans le schéma d'origine.
pub fn builtin_catalog() -> Catalog {
    Catalog::new(vec![
        CollectionSpec::new(
            "users",
            "Users",
            vec![
                A::string("email", true),
                A::string("name", true),
                A::string("tenant_id", false),
                A::datetime("created_at", true),
            ],
        ),
        CollectionSpec::new(
            "teams",
            "Teams",
            vec![
                A::string("team_name", true),
                A::string("leader_id", true),
                A::string("invitation_code", true),
                A::datetime("created_at", true),
            ],
        ),
        CollectionSpec::new(
            "team_members",
            "Team_Members",
            vec![
                A::string("user_id", true),
                A::string("team_id", true),
                A::string("role", true),
                A::datetime("joined_at", true),
            ],
        ),
        CollectionSpec::new(
            "tasks",
            "Tasks",
            vec![
                A::string("title", true),
                A::string("description", true),
                A::string("assigned_to", true),
                A::string("team_id", true),
                A::datetime("due_date", true),
                A::string("status", true),
                A::datetime("created_at", true),
                A::datetime("updated_at", true),
            ],
        ),
        CollectionSpec::new(
            "task_comments",
            "Task_Comments",
            vec![
                A::string("task_id", true),
                A::string("user_id", true),
                A::string("comment", true),
                A::datetime("created_at", true),
            ],
        ),
        CollectionSpec::new(
            "notifications",
            "Notifications",
            vec![
                A::string("user_id", true),
                A::string("message", true),
                A::string("status", true),
                A::datetime("created_at", true),
                A::string("task_id", false),
            ],
        ),
        CollectionSpec::new(
            "subscriptions",
            "Subscriptions",
            vec![
                A::string("user_id", true),
                A::string("plan_type", true),
                A::string("plan_duration", true),
                A::datetime("start_date", true),
                A::datetime("end_date", true),
                A::string("payment_status", true),
                A::boolean("auto_renewal", true),
            ],
        ),
        CollectionSpec::new(
            "payments",
            "Payments",
            vec![
                A::string("user_id", true),
                A::string("subscription_id", true),
                A::string("amount", true),
                A::string("payment_method", true),
                A::string("payment_status", true),
                A::string("transaction_id", true),
                A::string("payment_proof", true),
            ],
        ),
        CollectionSpec::new(
            "cleaning_photos",
            "Cleaning_Photos",
            vec![
                A::string("task_id", true),
                A::string("user_id", true),
                A::string("team_id", true),
                A::string("photo_url", true),
                A::string("photo_type", true),
                A::string("location_data", true),
            ],
        ),
    ])
}
