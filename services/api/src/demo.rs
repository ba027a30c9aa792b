use crate::infra::{
    seed_application, seed_listing, InMemoryApplicationRepository, InMemoryListingRepository,
    InMemoryReviewRepository, RecordingNotificationSender,
};
use clap::Args;
use std::sync::Arc;

use broker_directory::error::AppError;
use broker_directory::workflows::directory::applications::{
    ApplicationId, ApplicationIntakeService,
};
use broker_directory::workflows::directory::compare::{
    CompareAction, ComparisonSet, ListingFilter, Pager, AxisFilter, COMPARE_TOOL_LIMIT,
    DEFAULT_PAGE_SIZE,
};
use broker_directory::workflows::directory::listings::{
    ListingKind, ListingRepository, ListingStatus,
};
use broker_directory::workflows::directory::reviews::{
    RatingStep, ReviewModerationService, ReviewSubmission,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the vendor application intake portion of the demo.
    #[arg(long)]
    pub(crate) skip_intake: bool,
    /// Skip the comparison and filtering portion of the demo.
    #[arg(long)]
    pub(crate) skip_compare: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        skip_intake,
        skip_compare,
    } = args;

    let listings = Arc::new(InMemoryListingRepository::default());
    let reviews = Arc::new(InMemoryReviewRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let notifier = Arc::new(RecordingNotificationSender::default());

    let crm = listings.create(seed_listing(
        "brokerflow-crm",
        "BrokerFlow CRM",
        ListingKind::Software,
        "crm",
    ))?;
    let compliance = listings.create(seed_listing(
        "ledgerguard",
        "LedgerGuard",
        ListingKind::Software,
        "compliance",
    ))?;
    let consultancy = listings.create(seed_listing(
        "apex-advisory",
        "Apex Advisory",
        ListingKind::Service,
        "consulting",
    ))?;

    println!("Broker directory demo");
    println!(
        "- Seeded {} approved listings",
        listings.list(&Default::default())?.len()
    );

    println!("\nReview moderation walkthrough");
    let moderation = ReviewModerationService::new(
        listings.clone(),
        reviews,
        notifier.clone(),
        RatingStep::Half,
    );

    let first = moderation.submit(
        crm.id.clone(),
        ReviewSubmission {
            rating: 4.0,
            title: "Solid pipeline tracking".to_string(),
            body: "Cut our follow-up time in half.".to_string(),
            pros: Some("Easy onboarding".to_string()),
            cons: None,
            reviewer_name: "Jordan".to_string(),
            reviewer_email: Some("jordan@example.com".to_string()),
            anonymous: false,
        },
    )?;
    let second = moderation.submit(
        crm.id.clone(),
        ReviewSubmission {
            rating: 2.5,
            title: "Reporting is thin".to_string(),
            body: "Exports lack the fields our lenders ask for.".to_string(),
            pros: None,
            cons: Some("Limited exports".to_string()),
            reviewer_name: "Sam".to_string(),
            reviewer_email: Some("sam@example.com".to_string()),
            anonymous: false,
        },
    )?;
    println!(
        "- {} reviews queued for moderation",
        moderation.pending()?.len()
    );

    moderation.approve(&first.id)?;
    let after_first = listings.get(&crm.id)?.ok_or_else(|| AppError::Workflow("seeded listing missing".into()))?;
    println!(
        "- Approved '{}' -> {} avg {:.1} over {} reviews",
        first.title, after_first.name, after_first.rating, after_first.review_count
    );

    moderation.approve(&second.id)?;
    let after_second = listings.get(&crm.id)?.ok_or_else(|| AppError::Workflow("seeded listing missing".into()))?;
    println!(
        "- Approved '{}' -> avg {:.1} over {} reviews",
        second.title, after_second.rating, after_second.review_count
    );

    moderation.reject(&second.id, "Verified purchase could not be confirmed")?;
    let after_reject = listings.get(&crm.id)?.ok_or_else(|| AppError::Workflow("seeded listing missing".into()))?;
    println!(
        "- Rejected '{}' -> avg back to {:.1} over {} reviews",
        second.title, after_reject.rating, after_reject.review_count
    );

    if !skip_intake {
        println!("\nVendor application intake walkthrough");
        applications.seed(seed_application("app-000001", "Quota Quoting"));
        applications.seed(seed_application("app-000002", "Rate Finder"));

        let intake = ApplicationIntakeService::new(
            listings.clone(),
            applications.clone(),
            notifier.clone(),
        );
        println!("- {} applications pending", intake.pending()?.len());

        let outcome = intake.approve(
            &ApplicationId("app-000001".to_string()),
            "Strong category fit",
        )?;
        println!(
            "- Approved {} -> listing '{}' ({}, {})",
            outcome.application.company_name,
            outcome.listing.slug,
            outcome.listing.tier.label(),
            outcome.listing.status.label()
        );

        let rejected = intake.reject(
            &ApplicationId("app-000002".to_string()),
            "Reviewed 2026-08",
            "Category outside directory scope",
        )?;
        println!(
            "- Rejected {} -> status {}",
            rejected.company_name,
            rejected.status.label()
        );
    }

    if !skip_compare {
        println!("\nComparison and filtering walkthrough");
        let mut selection = ComparisonSet::new(COMPARE_TOOL_LIMIT);
        selection = ComparisonSet::apply(selection, CompareAction::Toggle(crm.id.clone()));
        selection = ComparisonSet::apply(selection, CompareAction::Toggle(compliance.id.clone()));
        selection = ComparisonSet::apply(selection, CompareAction::Toggle(consultancy.id.clone()));
        println!(
            "- Comparing {} of {} allowed listings",
            selection.len(),
            selection.max_items()
        );
        selection = ComparisonSet::apply(selection, CompareAction::Toggle(consultancy.id.clone()));
        println!("- Toggled one off -> {} selected", selection.len());
        selection = ComparisonSet::apply(selection, CompareAction::Clear);
        println!("- Cleared -> {} selected", selection.len());

        let all = listings.list(&Default::default())?;
        let software_only = ListingFilter {
            kind: AxisFilter::Only(ListingKind::Software),
            ..ListingFilter::default()
        };
        let matches = software_only.apply(&all);
        println!(
            "- Software filter keeps {} of {} listings",
            matches.len(),
            all.len()
        );

        let mut pager = Pager::new(DEFAULT_PAGE_SIZE);
        println!(
            "- First page shows {} results (more available: {})",
            pager.visible(&matches).len(),
            pager.has_more(matches.len())
        );
        pager.load_more();
        println!(
            "- After load more: {} visible",
            pager.visible(&matches).len()
        );
    }

    println!("\nNotifications recorded during the demo:");
    for event in notifier.events() {
        println!("  - to {} | {}", event.to, event.subject);
    }

    let approved = listings.list(&Default::default())?;
    println!(
        "\nDirectory closes with {} approved listings",
        approved
            .iter()
            .filter(|listing| listing.status == ListingStatus::Approved)
            .count()
    );

    Ok(())
}
