//! End-to-end resolution scenarios against the builtin registry.

use caregrid_rbac::{
    apply_overrides, baseline, resolve, AccountRole, Permission, PermissionOverride,
    PermissionSet, StaffAccessProfile, StaffRole, TemplateRegistry, User,
};
use uuid::Uuid;

fn admin(profile: Option<StaffAccessProfile>) -> User {
    let user = User::new(Uuid::now_v7(), AccountRole::Admin);
    match profile {
        Some(p) => user.with_staff_access(p),
        None => user,
    }
}

#[test]
fn pre_migration_admin_keeps_full_access() {
    let registry = TemplateRegistry::builtin();
    let user = admin(None);
    let set = resolve(Some(&user), &registry);

    assert_eq!(set.len(), 26);
    for perm in Permission::all() {
        assert!(set.contains(perm), "missing {}", perm.as_str());
    }
}

#[test]
fn single_deny_override_ends_full_access() {
    let registry = TemplateRegistry::builtin();
    let user_id = Uuid::now_v7();
    let user = admin(Some(StaffAccessProfile {
        staff_role: None,
        grants: vec![],
        overrides: vec![PermissionOverride::new(user_id, "billing.refund", false)],
    }));
    let set = resolve(Some(&user), &registry);

    assert_ne!(set.len(), 26);
    assert!(!set.contains(Permission::BillingRefund));
}

#[test]
fn support_lead_with_reply_denied() {
    let registry = TemplateRegistry::builtin();
    let user_id = Uuid::now_v7();
    let user = admin(Some(StaffAccessProfile {
        staff_role: Some(StaffRole::SupportLead),
        grants: vec![],
        overrides: vec![PermissionOverride::new(
            user_id,
            "support.messages.reply",
            false,
        )],
    }));
    let set = resolve(Some(&user), &registry);

    assert!(set.contains(Permission::SupportMessagesRead));
    assert!(!set.contains(Permission::SupportMessagesReply));
    assert!(!set.contains(Permission::PlatformSettingsWrite));
}

#[test]
fn provider_intrinsic_bundle() {
    let registry = TemplateRegistry::builtin();
    let user = User::new(Uuid::now_v7(), AccountRole::Provider);
    let set = resolve(Some(&user), &registry);

    let expected: PermissionSet = [
        Permission::DashboardView,
        Permission::ContentRead,
        Permission::ContentWrite,
        Permission::ContentSubmit,
    ]
    .into_iter()
    .collect();
    assert_eq!(set, expected);
}

#[test]
fn null_identity_has_no_permissions() {
    let registry = TemplateRegistry::builtin();
    assert!(resolve(None, &registry).is_empty());
}

#[test]
fn non_admin_never_exceeds_baseline_plus_grants() {
    let registry = TemplateRegistry::builtin();
    for role in [AccountRole::Provider, AccountRole::Client] {
        let user_id = Uuid::now_v7();
        let user = User::new(user_id, role).with_staff_access(StaffAccessProfile {
            // Staff role on a non-admin account must be inert
            staff_role: Some(StaffRole::SuperAdmin),
            grants: vec!["reports.read".to_string()],
            overrides: vec![
                PermissionOverride::new(user_id, "users.delete", true),
                PermissionOverride::new(user_id, "users.delete", false),
            ],
        });
        let set = resolve(Some(&user), &registry);

        let mut ceiling = baseline(role);
        ceiling.insert(Permission::ReportsRead);
        assert!(ceiling.contains_all(&set), "{:?} exceeded ceiling", role);
        assert!(!set.contains(Permission::PlatformSettingsWrite));
    }
}

#[test]
fn overrides_on_unrelated_codes_are_noops() {
    let registry = TemplateRegistry::builtin();
    let user_id = Uuid::now_v7();
    let user = User::new(user_id, AccountRole::Provider).with_staff_access(StaffAccessProfile {
        staff_role: None,
        grants: vec![],
        overrides: vec![PermissionOverride::new(user_id, "billing.refund", false)],
    });
    let set = resolve(Some(&user), &registry);
    assert_eq!(set, baseline(AccountRole::Provider));
}

#[test]
fn super_admin_ignores_denies() {
    let registry = TemplateRegistry::builtin();
    let user_id = Uuid::now_v7();
    let mut overrides: Vec<PermissionOverride> = Permission::all()
        .into_iter()
        .map(|p| PermissionOverride::new(user_id, p.as_str(), false))
        .collect();
    overrides.push(PermissionOverride::new(user_id, "dashboard.view", false));

    let user = admin(Some(StaffAccessProfile {
        staff_role: Some(StaffRole::SuperAdmin),
        grants: vec![],
        overrides,
    }));
    let set = resolve(Some(&user), &registry);
    assert_eq!(set, PermissionSet::full_catalog());
}

#[test]
fn override_application_is_idempotent() {
    let user_id = Uuid::now_v7();
    let overrides = vec![
        PermissionOverride::new(user_id, "users.read", true),
        PermissionOverride::new(user_id, "users.write", false),
    ];
    let start: PermissionSet = [Permission::UsersWrite, Permission::AuditRead]
        .into_iter()
        .collect();

    let once = apply_overrides(start, &overrides);
    let twice = apply_overrides(once.clone(), &overrides);
    assert_eq!(once, twice);
}
