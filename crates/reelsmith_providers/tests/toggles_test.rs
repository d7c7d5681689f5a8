//! Mode selection and fail-fast credential tests.

use reelsmith_error::ReelsmithErrorKind;
use reelsmith_providers::{
    AvatarCredentials, ProviderEndpoint, ProviderMode, ProviderSettings, ProviderToggles,
    RetryPolicy, build_avatar_renderer, build_uploader,
};

#[test]
fn kill_switch_forces_simulated_everywhere() {
    let toggles = ProviderToggles {
        avatar: ProviderMode::Live,
        upload: ProviderMode::Live,
        kill_switch: true,
    };

    assert_eq!(toggles.effective_avatar(), ProviderMode::Simulated);
    assert_eq!(toggles.effective_upload(), ProviderMode::Simulated);
}

#[test]
fn per_provider_modes_are_independent() {
    let toggles = ProviderToggles {
        avatar: ProviderMode::Live,
        upload: ProviderMode::Simulated,
        kill_switch: false,
    };

    assert_eq!(toggles.effective_avatar(), ProviderMode::Live);
    assert_eq!(toggles.effective_upload(), ProviderMode::Simulated);
}

#[test]
fn live_renderer_without_credentials_fails_fast() {
    let toggles = ProviderToggles {
        avatar: ProviderMode::Live,
        ..ProviderToggles::simulated()
    };
    let settings = ProviderSettings {
        avatar: ProviderEndpoint {
            base_url: "https://avatar.invalid/v1".to_string(),
            ..ProviderEndpoint::default()
        },
        ..ProviderSettings::default()
    };

    let err = build_avatar_renderer(&toggles, &settings, None, RetryPolicy::default())
        .unwrap_err();

    match err.kind() {
        ReelsmithErrorKind::Provider(provider) => {
            assert!(format!("{}", provider.kind).contains("Missing credentials"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[test]
fn live_renderer_rejects_blank_api_key() {
    let toggles = ProviderToggles {
        avatar: ProviderMode::Live,
        ..ProviderToggles::simulated()
    };
    let settings = ProviderSettings {
        avatar: ProviderEndpoint {
            base_url: "https://avatar.invalid/v1".to_string(),
            ..ProviderEndpoint::default()
        },
        ..ProviderSettings::default()
    };

    let result = build_avatar_renderer(
        &toggles,
        &settings,
        Some(AvatarCredentials::new("   ")),
        RetryPolicy::default(),
    );

    assert!(result.is_err());
}

#[test]
fn kill_switch_builds_simulated_even_with_live_toggle() {
    let toggles = ProviderToggles {
        upload: ProviderMode::Live,
        kill_switch: true,
        ..ProviderToggles::simulated()
    };

    // no credentials, no endpoint: must still succeed because the
    // kill-switch forces the simulated variant
    let uploader = build_uploader(
        &toggles,
        &ProviderSettings::default(),
        None,
        RetryPolicy::default(),
    );

    assert!(uploader.is_ok());
}
