//! Property-based tests for `cloudform_core`.
//!
//! These tests drive the form and its models with arbitrary edit sequences
//! and check the draft invariants after every step.

use cloudform_core::credential::mask;
use cloudform_core::prelude::*;
use cloudform_core::store::{BoxFuture, LookupError, SinkError};
use cloudform_core::{FormError, ScheduleField};
use proptest::prelude::*;

struct NoRecords;

impl RecordLookup for NoRecords {
    fn lookup<'a>(&'a self, _id: &'a str) -> BoxFuture<'a, Result<Option<CloudRecord>, LookupError>> {
        Box::pin(async { Ok(None) })
    }
}

struct Discard;

impl RecordSink for Discard {
    fn save<'a>(&'a self, payload: &'a CloudRecordPayload) -> BoxFuture<'a, Result<SaveReceipt, SinkError>> {
        Box::pin(async move { Ok(SaveReceipt::for_payload(payload)) })
    }
}

fn open_form() -> CloudForm<NoRecords, Discard> {
    let mut form = CloudForm::new(NoRecords, Discard, FormConfig::default());
    form.init_create();
    form
}

fn provider() -> impl Strategy<Value = Provider> {
    prop::sample::select(Provider::ALL.to_vec())
}

fn frequency() -> impl Strategy<Value = Frequency> {
    prop::sample::select(Frequency::ALL.to_vec())
}

fn region() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["global", "us-east-1", "us-west-2", "eu-west-1", "ap-northeast-2", "nowhere-1"])
        .prop_map(String::from)
}

#[derive(Debug, Clone)]
enum Edit {
    Provider(Provider),
    Region(String),
    Field(CredentialField, String),
    Schedule(bool),
    Frequency(Frequency),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        provider().prop_map(Edit::Provider),
        region().prop_map(Edit::Region),
        (prop::sample::select(CredentialField::ALL.to_vec()), "[ a-zA-Z0-9]{0,12}")
            .prop_map(|(field, value)| Edit::Field(field, value)),
        any::<bool>().prop_map(Edit::Schedule),
        frequency().prop_map(Edit::Frequency),
    ]
}

fn apply(form: &mut CloudForm<NoRecords, Discard>, edit: Edit) -> Result<(), FormError> {
    match edit {
        Edit::Provider(p) => form.set_provider(p),
        Edit::Region(r) => form.toggle_region(&r).map(drop),
        Edit::Field(f, v) => form.edit_credential_field(f, v),
        Edit::Schedule(on) => form.set_schedule_enabled(on),
        Edit::Frequency(f) => form.set_frequency(f),
    }
}

proptest! {
    /// Switching provider always yields exactly that provider's defaults.
    #[test]
    fn set_provider_yields_defaults(edits in prop::collection::vec(edit(), 0..20), target in provider()) {
        let mut form = open_form();
        for e in edits {
            let _ = apply(&mut form, e);
        }
        form.set_provider(target).unwrap();

        let draft = form.draft().unwrap();
        prop_assert_eq!(draft.credentials(), &defaults_for(target));
        prop_assert_eq!(draft.credential_type(), target.default_credential_type());
    }

    /// The mandatory region survives any edit sequence.
    #[test]
    fn mandatory_region_always_selected(edits in prop::collection::vec(edit(), 0..40)) {
        let mut form = open_form();
        for e in edits {
            let _ = apply(&mut form, e);
            prop_assert!(form.draft().unwrap().regions().contains("global"));
        }
    }

    /// The credential variant and type always agree with the provider.
    #[test]
    fn credentials_match_provider(edits in prop::collection::vec(edit(), 0..40)) {
        let mut form = open_form();
        for e in edits {
            let _ = apply(&mut form, e);
            let draft = form.draft().unwrap();
            prop_assert_eq!(draft.credentials().provider(), draft.provider());
            prop_assert!(draft.credential_type().is_legal_for(draft.provider()));
        }
    }

    /// After any frequency transition the schedule carries exactly the
    /// fields its frequency requires.
    #[test]
    fn schedule_fields_follow_frequency(steps in prop::collection::vec(frequency(), 1..10)) {
        let mut setting = ScheduleScanSetting::default();
        for f in steps {
            setting = setting.with_frequency(f);
            prop_assert_eq!(setting.frequency(), f);
            prop_assert_eq!(setting.hour().is_some(), f.requires(ScheduleField::Hour));
            prop_assert_eq!(setting.date().is_some(), f.requires(ScheduleField::Date));
            prop_assert_eq!(setting.weekday().is_some(), f.requires(ScheduleField::Weekday));
        }
    }

    /// A schedule survives a trip through its wire form.
    #[test]
    fn schedule_wire_form_is_lossless(f in frequency(), hour in 0u8..24, minute in 0u8..12, date in 1u8..=28) {
        let mut setting = ScheduleScanSetting::for_frequency(f);
        let _ = setting.set_hour(&hour.to_string());
        setting.set_minute(&(minute * 5).to_string()).unwrap();
        let _ = setting.set_date(&date.to_string());

        let json = serde_json::to_string(&setting).unwrap();
        let restored: ScheduleScanSetting = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, setting);
    }

    /// Hours outside 0..=23 are always rejected.
    #[test]
    fn out_of_range_hour_rejected(hour in 24u32..10_000) {
        let mut setting = ScheduleScanSetting::default();
        prop_assert!(setting.set_hour(&hour.to_string()).is_err());
        prop_assert_eq!(setting, ScheduleScanSetting::default());
    }

    /// Minutes that are not multiples of five are always rejected.
    #[test]
    fn off_grid_minute_rejected(minute in (0u32..60).prop_filter("off grid", |m| m % 5 != 0)) {
        let mut setting = ScheduleScanSetting::default();
        prop_assert!(setting.set_minute(&minute.to_string()).is_err());
    }

    /// Masking never reveals a long value in full.
    #[test]
    fn masked_value_hides_middle(s in "[a-zA-Z0-9/+]{24,80}") {
        prop_assert!(!mask::mask(&s).contains(&s));
    }

    /// Summaries are never empty and name the frequency's cadence.
    #[test]
    fn summary_mentions_cadence(f in frequency()) {
        let summary = ScheduleScanSetting::for_frequency(f).summary();
        let expected = match f {
            Frequency::Hour => "every hour",
            Frequency::Day => "daily",
            Frequency::Week => "weekly",
            Frequency::Month => "monthly",
        };
        prop_assert!(summary.starts_with(expected), "{summary}");
    }
}
