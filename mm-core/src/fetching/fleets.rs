use crate::collect::collect_results;
use crate::esi_client::{route_jumps, RouteLookup};
use crate::mm_client::characters::CharacterApi;
use crate::mm_client::doctrines::DoctrineApi;
use crate::mm_client::fleets::{FleetApi, FleetListKind};
use crate::static_data::SunTypeLookup;
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use itertools::Itertools;
use mm_domain::dates::{format_eve_time, time_diff_text, DateTextError};
use mm_domain::grouping::group_by_first_seen;
use mm_domain::{
    translate, CharacterBasic, CharacterId, EveCharacterProfile, Fleet, FleetComposition, FleetId, FleetItem, FleetMember, FleetRadar, FleetTrackingTexts,
    FleetUi, Locale, SolarSystemId, TranslationKey, UserId,
};
use tracing::{debug, warn};

pub const SOSALA_SYSTEM_ID: SolarSystemId = SolarSystemId(30003070);
pub const DEFAULT_STAGING_SYSTEM: SolarSystemId = SOSALA_SYSTEM_ID;

/// Fleets visible to the authenticated user, with their commander resolved.
///
/// Fleets without a commander are dropped. Past fleets (`upcoming == false`) are limited to
/// the ones that were tracked or have already started at `now`.
pub async fn fetch_fleets_auth(
    fleet_api: &dyn FleetApi,
    character_api: &dyn CharacterApi,
    access_token: &str,
    upcoming: bool,
    now: DateTime<Utc>,
    locale: Locale,
) -> Result<Vec<FleetItem>> {
    let kind = if upcoming { FleetListKind::Active } else { FleetListKind::Recent };

    let fleets = fleet_api
        .get_fleets_v3(access_token, kind)
        .await?
        .into_iter()
        .filter(|fleet| fleet_commander(fleet).is_some())
        .filter(|fleet| upcoming || fleet.tracking.is_some() || fleet.start_time < now)
        .collect_vec();

    let fleet_commanders = fleets.iter().filter_map(fleet_commander).unique().collect_vec();
    debug!("Resolving {} fleet commanders for {} fleets", fleet_commanders.len(), fleets.len());

    let profiles = character_api.get_users_character(fleet_commanders).await?;

    Ok(fleets
        .into_iter()
        .map(|fleet| {
            let profile = profiles.iter().find(|profile| profile.user_id.is_some() && profile.user_id == fleet.fleet_commander);
            add_fleet_info(fleet, profile, locale)
        })
        .collect())
}

/// Public fleet list without commander details.
pub async fn fetch_fleets(fleet_api: &dyn FleetApi, upcoming: bool, locale: Locale) -> Result<Vec<FleetItem>> {
    let fleets = fleet_api.get_fleets_v2(upcoming).await?;

    Ok(fleets
        .into_iter()
        .map(|fleet| FleetItem {
            id: fleet.id,
            description: String::new(),
            audience: fleet.audience,
            doctrine_id: None,
            fleet_commander_id: CharacterId(0),
            fleet_commander_name: translate(locale, TranslationKey::NotAvailable).to_string(),
            location: String::new(),
            start_time: far_future(),
            fleet_type: String::new(),
            tracking: None,
            status: None,
        })
        .collect())
}

pub fn add_fleet_info(fleet: Fleet, fc_profile: Option<&EveCharacterProfile>, locale: Locale) -> FleetItem {
    FleetItem {
        id: fleet.id,
        description: fleet.description,
        audience: fleet.audience,
        doctrine_id: fleet.doctrine_id,
        fleet_commander_id: fc_profile.map(|profile| profile.character_id).unwrap_or(CharacterId(0)),
        fleet_commander_name: fc_profile
            .map(|profile| profile.character_name.clone())
            .unwrap_or_else(|| translate(locale, TranslationKey::NotAvailable).to_string()),
        location: fleet.location,
        start_time: fleet.start_time,
        fleet_type: fleet.fleet_type,
        tracking: fleet.tracking,
        status: fleet.status,
    }
}

/// Detail view of one fleet. Commander and doctrine are resolved concurrently.
pub async fn fetch_fleet_by_id(
    fleet_api: &dyn FleetApi,
    character_api: &dyn CharacterApi,
    doctrine_api: &dyn DoctrineApi,
    access_token: &str,
    fleet_id: FleetId,
    locale: Locale,
) -> Result<FleetUi> {
    let fleet = fleet_api.get_fleet_by_id(access_token, fleet_id).await?;

    let commander = async {
        match fleet_commander(&fleet) {
            Some(user_id) => character_api.get_user_character(user_id).await,
            None => Ok(None),
        }
    };

    let doctrine = async {
        match fleet.doctrine_id {
            Some(doctrine_id) => doctrine_api.get_doctrine_by_id(doctrine_id).await.map(Some),
            None => Ok(None),
        }
    };

    let (character_profile, doctrine) = tokio::try_join!(commander, doctrine)?;

    Ok(FleetUi {
        id: fleet.id,
        description: fleet.description,
        fleet_commander_id: character_profile.as_ref().map(|profile| profile.character_id).unwrap_or(CharacterId(0)),
        fleet_commander_name: character_profile
            .map(|profile| profile.character_name)
            .unwrap_or_else(|| translate(locale, TranslationKey::UnknownCharacter).to_string()),
        location: fleet.location,
        start_time: fleet.start_time,
        fleet_type: fleet.fleet_type,
        doctrine,
        tracking: fleet.tracking,
        audience: fleet.audience,
        disable_motd: fleet.disable_motd,
        status: fleet.status,
    })
}

pub fn group_members_by_ship(members: &[FleetMember]) -> Vec<FleetComposition> {
    group_by_first_seen(members, |member| member.ship_type_id)
        .into_iter()
        .map(|(ship_type_id, members)| FleetComposition {
            ship_type_id,
            ship_type_name: members[0].ship_type_name.clone(),
            members: members.into_iter().map(character_basic).collect(),
        })
        .collect()
}

/// Groups members by solar system and resolves, per system, the jumps to the staging system and the sun type.
/// All lookups run concurrently; groups keep the order in which their system was first seen.
pub async fn group_members_by_location(
    route_lookup: &dyn RouteLookup,
    sun_types: &dyn SunTypeLookup,
    members: &[FleetMember],
    staging_solar_system_id: Option<SolarSystemId>,
) -> Result<Vec<FleetRadar>> {
    let staging_solar_system_id = staging_solar_system_id.unwrap_or(DEFAULT_STAGING_SYSTEM);
    let groups = group_by_first_seen(members, |member| member.solar_system_id);

    collect_results(groups, |(solar_system_id, members)| async move {
        let (route, sun_type_id) = tokio::try_join!(
            route_lookup.get_route(solar_system_id, staging_solar_system_id),
            sun_types.get_system_sun_type_id(solar_system_id)
        )?;

        Ok(FleetRadar {
            solar_system_id,
            solar_system_name: members[0].solar_system_name.clone(),
            sun_type_id,
            jumps: route_jumps(&route),
            members: members.into_iter().map(character_basic).collect(),
        })
    })
    .await
}

/// User ids of the fleet's members, empty if the fleet has no user list.
pub async fn fetch_fleet_users(fleet_api: &dyn FleetApi, fleet_id: FleetId) -> Result<Vec<UserId>> {
    let fleet_users = fleet_api.get_fleet_users(fleet_id).await?;

    Ok(fleet_users.into_iter().next().map(|users| users.user_ids).unwrap_or_default())
}

/// Texts for a finished, tracked fleet. `None` if the fleet has no tracking end time or the texts can't be rendered.
pub fn get_fleet_tracking_texts(locale: Locale, fleet: &FleetUi, datetime_format: &str) -> Option<FleetTrackingTexts> {
    let tracking = fleet.tracking.as_ref()?;
    let end_time = tracking.end_time?;

    let texts = || -> Result<FleetTrackingTexts, DateTextError> {
        let fleet_start_eve_time_text = format_eve_time(locale, &tracking.start_time, datetime_format)?;
        let fleet_end_eve_time_text = format_eve_time(locale, &end_time, datetime_format)?;
        let fleet_tracking_hint = translate(locale, TranslationKey::FleetTrackingHint)
            .replace("FLEET_START", &fleet_start_eve_time_text)
            .replace("FLEET_END", &fleet_end_eve_time_text);
        let fleet_duration_text = time_diff_text(locale, &tracking.start_time, &end_time)?;

        Ok(FleetTrackingTexts {
            fleet_end_eve_time_text,
            fleet_duration_text,
            fleet_tracking_hint,
        })
    };

    match texts() {
        Ok(texts) => Some(texts),
        Err(err) => {
            warn!("No tracking texts for fleet {}: {}", fleet.id, err);
            None
        }
    }
}

fn fleet_commander(fleet: &Fleet) -> Option<UserId> {
    fleet.fleet_commander.filter(|user_id| user_id.0 > 0)
}

fn character_basic(member: &FleetMember) -> CharacterBasic {
    CharacterBasic {
        character_id: member.character_id,
        character_name: member.character_name.clone(),
    }
}

fn far_future() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).single().unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::esi_client::MockRouteLookup;
    use crate::mm_client::characters::MockCharacterApi;
    use crate::mm_client::doctrines::MockDoctrineApi;
    use crate::mm_client::fleets::MockFleetApi;
    use crate::static_data::{InMemorySunTypes, MockSunTypeLookup};
    use anyhow::anyhow;
    use mm_domain::{Doctrine, DoctrineId, FleetBasic, FleetTracking, FleetUsers, ShipTypeId};
    use mockall::predicate::*;
    use std::collections::HashMap;
    use test_log::test;

    fn time(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap()
    }

    fn fleet(id: i64, fleet_commander: Option<i64>, start_time: DateTime<Utc>) -> Fleet {
        Fleet {
            id: FleetId(id),
            description: format!("Fleet {id}"),
            audience: "Militia".to_string(),
            doctrine_id: None,
            fleet_commander: fleet_commander.map(UserId),
            location: "Sosala".to_string(),
            start_time,
            fleet_type: "strategic".to_string(),
            tracking: None,
            status: None,
            disable_motd: false,
        }
    }

    fn profile(user_id: i64, character_id: i64, name: &str) -> EveCharacterProfile {
        EveCharacterProfile {
            user_id: Some(UserId(user_id)),
            character_id: CharacterId(character_id),
            character_name: name.to_string(),
            corporation_id: None,
            corporation_name: None,
        }
    }

    fn member(character_id: i64, ship_type_id: i64, solar_system_id: i64) -> FleetMember {
        FleetMember {
            character_id: CharacterId(character_id),
            character_name: format!("Pilot {character_id}"),
            ship_type_id: ShipTypeId(ship_type_id),
            ship_type_name: format!("Ship {ship_type_id}"),
            solar_system_id: SolarSystemId(solar_system_id),
            solar_system_name: format!("System {solar_system_id}"),
        }
    }

    fn fleet_ui(tracking: Option<FleetTracking>) -> FleetUi {
        FleetUi {
            id: FleetId(1),
            description: "Roam".to_string(),
            fleet_commander_id: CharacterId(9),
            fleet_commander_name: "FC".to_string(),
            location: "Amamake".to_string(),
            start_time: time(2, 18),
            fleet_type: "strategic".to_string(),
            doctrine: None,
            tracking,
            audience: "Militia".to_string(),
            disable_motd: false,
            status: None,
        }
    }

    #[test(tokio::test)]
    async fn commanders_are_resolved_in_one_batch() {
        let mut fleet_api = MockFleetApi::new();
        fleet_api
            .expect_get_fleets_v3()
            .withf(|_, kind| *kind == FleetListKind::Active)
            .times(1)
            .returning(|_, _| Ok(vec![fleet(1, Some(7), time(3, 18)), fleet(2, None, time(3, 19)), fleet(3, Some(7), time(4, 18)), fleet(4, Some(8), time(5, 18))]));

        let mut character_api = MockCharacterApi::new();
        character_api
            .expect_get_users_character()
            .with(eq(vec![UserId(7), UserId(8)]))
            .times(1)
            .returning(|_| Ok(vec![profile(7, 700, "Seven")]));

        let fleets = fetch_fleets_auth(&fleet_api, &character_api, "token", true, time(1, 0), Locale::En).await.unwrap();

        assert_eq!(fleets.iter().map(|f| f.id.0).collect_vec(), vec![1, 3, 4]);
        assert_eq!(fleets[0].fleet_commander_name, "Seven");
        assert_eq!(fleets[0].fleet_commander_id, CharacterId(700));
        assert_eq!(fleets[2].fleet_commander_name, "Not available");
        assert_eq!(fleets[2].fleet_commander_id, CharacterId(0));
    }

    #[test(tokio::test)]
    async fn recent_fleets_must_be_tracked_or_started() {
        let mut tracked = fleet(2, Some(7), time(20, 18));
        tracked.tracking = Some(FleetTracking {
            id: Some(1),
            start_time: time(20, 18),
            end_time: None,
            is_registered: false,
        });

        let mut fleet_api = MockFleetApi::new();
        fleet_api
            .expect_get_fleets_v3()
            .withf(|_, kind| *kind == FleetListKind::Recent)
            .returning(move |_, _| Ok(vec![fleet(1, Some(7), time(5, 18)), tracked.clone(), fleet(3, Some(7), time(25, 18))]));

        let mut character_api = MockCharacterApi::new();
        character_api.expect_get_users_character().returning(|_| Ok(vec![]));

        let fleets = fetch_fleets_auth(&fleet_api, &character_api, "token", false, time(10, 0), Locale::Es).await.unwrap();

        assert_eq!(fleets.iter().map(|f| f.id.0).collect_vec(), vec![1, 2]);
        assert_eq!(fleets[0].fleet_commander_name, "No disponible");
    }

    #[test(tokio::test)]
    async fn character_lookup_failure_aborts_listing() {
        let mut fleet_api = MockFleetApi::new();
        fleet_api.expect_get_fleets_v3().returning(|_, _| Ok(vec![fleet(1, Some(7), time(3, 18))]));

        let mut character_api = MockCharacterApi::new();
        character_api.expect_get_users_character().returning(|_| Err(anyhow!("Error fetching characters")));

        let result = fetch_fleets_auth(&fleet_api, &character_api, "token", true, time(1, 0), Locale::En).await;

        assert!(result.is_err());
    }

    #[test(tokio::test)]
    async fn public_fleets_use_placeholder_commander() {
        let mut fleet_api = MockFleetApi::new();
        fleet_api.expect_get_fleets_v2().with(eq(true)).returning(|_| {
            Ok(vec![FleetBasic {
                id: FleetId(11),
                audience: "Alliance".to_string(),
            }])
        });

        let fleets = fetch_fleets(&fleet_api, true, Locale::En).await.unwrap();

        assert_eq!(fleets[0].fleet_commander_id, CharacterId(0));
        assert_eq!(fleets[0].fleet_commander_name, "Not available");
        assert_eq!(fleets[0].start_time, Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap());
    }

    #[test(tokio::test)]
    async fn fleet_detail_resolves_commander_and_doctrine() {
        let mut with_doctrine = fleet(5, Some(7), time(3, 18));
        with_doctrine.doctrine_id = Some(DoctrineId(12));
        with_doctrine.disable_motd = true;

        let mut fleet_api = MockFleetApi::new();
        fleet_api.expect_get_fleet_by_id().withf(|_, id| *id == FleetId(5)).returning(move |_, _| Ok(with_doctrine.clone()));

        let mut character_api = MockCharacterApi::new();
        character_api.expect_get_user_character().with(eq(UserId(7))).returning(|_| Ok(Some(profile(7, 700, "Seven"))));

        let mut doctrine_api = MockDoctrineApi::new();
        doctrine_api.expect_get_doctrine_by_id().with(eq(DoctrineId(12))).returning(|id| {
            Ok(Doctrine {
                id,
                name: "Hurricane Fleet".to_string(),
                doctrine_type: "skirmish".to_string(),
                description: String::new(),
                sig_ids: vec![],
            })
        });

        let fleet = fetch_fleet_by_id(&fleet_api, &character_api, &doctrine_api, "token", FleetId(5), Locale::En).await.unwrap();

        assert_eq!(fleet.fleet_commander_name, "Seven");
        assert_eq!(fleet.doctrine.map(|d| d.name), Some("Hurricane Fleet".to_string()));
        assert!(fleet.disable_motd);
    }

    #[test(tokio::test)]
    async fn unresolved_commander_is_unknown_character() {
        let mut fleet_api = MockFleetApi::new();
        fleet_api.expect_get_fleet_by_id().returning(|_, _| Ok(fleet(5, Some(7), time(3, 18))));

        let mut character_api = MockCharacterApi::new();
        character_api.expect_get_user_character().returning(|_| Ok(None));

        let mut doctrine_api = MockDoctrineApi::new();
        doctrine_api.expect_get_doctrine_by_id().never();

        let fleet = fetch_fleet_by_id(&fleet_api, &character_api, &doctrine_api, "token", FleetId(5), Locale::En).await.unwrap();

        assert_eq!(fleet.fleet_commander_name, "Unknown character");
        assert_eq!(fleet.fleet_commander_id, CharacterId(0));
        assert_eq!(fleet.doctrine, None);
    }

    #[test]
    fn members_are_grouped_by_ship_in_first_seen_order() {
        let members = vec![member(1, 100, 1), member(2, 200, 1), member(3, 100, 2)];

        let groups = group_members_by_ship(&members);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].ship_type_id, ShipTypeId(100));
        assert_eq!(groups[0].ship_type_name, "Ship 100");
        assert_eq!(groups[0].members.iter().map(|m| m.character_id.0).collect_vec(), vec![1, 3]);
        assert_eq!(groups[1].ship_type_id, ShipTypeId(200));
        assert_eq!(groups[1].members.iter().map(|m| m.character_id.0).collect_vec(), vec![2]);
    }

    #[test(tokio::test)]
    async fn members_are_grouped_by_location_with_jumps_and_sun_type() {
        let members = vec![member(1, 100, 30002537), member(2, 100, 30003070), member(3, 200, 30002537)];

        let mut route_lookup = MockRouteLookup::new();
        route_lookup
            .expect_get_route()
            .with(eq(SolarSystemId(30002537)), eq(DEFAULT_STAGING_SYSTEM))
            .returning(|origin, destination| Ok(vec![origin, SolarSystemId(30002538), destination]));
        route_lookup
            .expect_get_route()
            .with(eq(SolarSystemId(30003070)), eq(DEFAULT_STAGING_SYSTEM))
            .returning(|origin, _| Ok(vec![origin]));

        let sun_types = InMemorySunTypes::new(HashMap::from([(SolarSystemId(30003070), 3802)]));

        let radar = group_members_by_location(&route_lookup, &sun_types, &members, None).await.unwrap();

        assert_eq!(radar.len(), 2);
        assert_eq!(radar[0].solar_system_id, SolarSystemId(30002537));
        assert_eq!(radar[0].jumps, Some(2));
        assert_eq!(radar[0].sun_type_id, None);
        assert_eq!(radar[0].members.iter().map(|m| m.character_id.0).collect_vec(), vec![1, 3]);
        assert_eq!(radar[1].solar_system_id, SolarSystemId(30003070));
        assert_eq!(radar[1].jumps, Some(0));
        assert_eq!(radar[1].sun_type_id, Some(3802));
    }

    #[test(tokio::test)]
    async fn custom_staging_system_and_missing_route() {
        let members = vec![member(1, 100, 30000001)];

        let mut route_lookup = MockRouteLookup::new();
        route_lookup.expect_get_route().with(eq(SolarSystemId(30000001)), eq(SolarSystemId(30002537))).returning(|_, _| Ok(vec![]));

        let mut sun_types = MockSunTypeLookup::new();
        sun_types.expect_get_system_sun_type_id().returning(|_| Ok(Some(6)));

        let radar = group_members_by_location(&route_lookup, &sun_types, &members, Some(SolarSystemId(30002537))).await.unwrap();

        assert_eq!(radar[0].jumps, None);
        assert_eq!(radar[0].sun_type_id, Some(6));
    }

    #[test(tokio::test)]
    async fn route_failure_aborts_location_grouping() {
        let members = vec![member(1, 100, 30000001)];

        let mut route_lookup = MockRouteLookup::new();
        route_lookup.expect_get_route().returning(|_, _| Err(anyhow!("Error fetching route")));

        let sun_types = InMemorySunTypes::default();

        assert!(group_members_by_location(&route_lookup, &sun_types, &members, None).await.is_err());
    }

    #[test(tokio::test)]
    async fn fleet_users_come_from_first_entry() {
        let mut fleet_api = MockFleetApi::new();
        fleet_api.expect_get_fleet_users().with(eq(FleetId(1))).returning(|fleet_id| {
            Ok(vec![
                FleetUsers {
                    fleet_id,
                    user_ids: vec![UserId(3), UserId(4)],
                },
                FleetUsers {
                    fleet_id,
                    user_ids: vec![UserId(5)],
                },
            ])
        });
        fleet_api.expect_get_fleet_users().with(eq(FleetId(2))).returning(|_| Ok(vec![]));

        assert_eq!(fetch_fleet_users(&fleet_api, FleetId(1)).await.unwrap(), vec![UserId(3), UserId(4)]);
        assert!(fetch_fleet_users(&fleet_api, FleetId(2)).await.unwrap().is_empty());
    }

    #[test]
    fn tracking_texts_for_finished_fleet() {
        let fleet = fleet_ui(Some(FleetTracking {
            id: Some(1),
            start_time: time(2, 18),
            end_time: Some(Utc.with_ymd_and_hms(2025, 1, 2, 20, 15, 0).unwrap()),
            is_registered: true,
        }));

        let texts = get_fleet_tracking_texts(Locale::En, &fleet, "%Y-%m-%d %H:%M").unwrap();

        assert_eq!(texts.fleet_end_eve_time_text, "2025-01-02 20:15");
        assert_eq!(texts.fleet_duration_text, "2 hours 15 minutes");
        assert_eq!(texts.fleet_tracking_hint, "Fleet tracked from 2025-01-02 18:00 to 2025-01-02 20:15");
    }

    #[test]
    fn no_tracking_texts_without_end_time() {
        let open = fleet_ui(Some(FleetTracking {
            id: Some(1),
            start_time: time(2, 18),
            end_time: None,
            is_registered: false,
        }));

        assert_eq!(get_fleet_tracking_texts(Locale::En, &open, "%Y-%m-%d %H:%M"), None);
        assert_eq!(get_fleet_tracking_texts(Locale::En, &fleet_ui(None), "%Y-%m-%d %H:%M"), None);
    }

    #[test]
    fn broken_format_yields_no_tracking_texts() {
        let fleet = fleet_ui(Some(FleetTracking {
            id: None,
            start_time: time(2, 18),
            end_time: Some(time(2, 20)),
            is_registered: true,
        }));

        assert_eq!(get_fleet_tracking_texts(Locale::En, &fleet, "%Q"), None);
    }
}
