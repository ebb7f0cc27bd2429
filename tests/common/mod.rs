//! Shared payload fixtures for integration tests
//!
//! Each helper returns a minimal but complete payload, shaped like the
//! corresponding endpoint's response.

#![allow(dead_code)]

use serde_json::{json, Value};

pub fn remove_key(value: &mut Value, key: &str) {
    value
        .as_object_mut()
        .expect("fixture should be an object")
        .remove(key);
}

pub fn store_entry(dev_name: &str, panel: Option<u32>) -> Value {
    let categories = match panel {
        Some(n) => json!([format!("Panel {:02}", n)]),
        None => json!([]),
    };
    json!({
        "devName": dev_name,
        "offerId": format!("v2:/{}", dev_name.len()),
        "offerType": "StaticPrice",
        "displayAssetPath": "/Game/Catalog/DisplayAssets/DA_Featured_Glider_ID_001.DA_Featured_Glider_ID_001",
        "dailyLimit": -1,
        "weeklyLimit": -1,
        "monthlyLimit": -1,
        "prices": [{"currencyType": "MtxCurrency", "finalPrice": 500}],
        "refundable": true,
        "itemGrants": [{"templateId": "AthenaGlider:glider_id_001", "quantity": 1}],
        "categories": categories
    })
}

pub fn store_json() -> Value {
    json!({
        "refreshIntervalHrs": 24,
        "dailyPurchaseHrs": 24,
        "expiration": "2024-05-02T00:00:00.000Z",
        "storefronts": [
            {"name": "CurrencyStorefront", "catalogEntries": [{"unrelated": true}]},
            {"name": "BRWeeklyStorefront", "catalogEntries": [
                store_entry("[VIRTUAL]1 x Mako for 500 MtxCurrency", Some(1)),
                store_entry("[VIRTUAL]2 x Mako, 1 x Raven for 2000 MtxCurrency", Some(2))
            ]},
            {"name": "BRDailyStorefront", "catalogEntries": [store_entry("daily", None)]},
            {"name": "BRSpecialFeatured", "catalogEntries": []},
            {"name": "BRSpecialDaily", "catalogEntries": []}
        ]
    })
}

/// Merge the keys of `extra` into `base`
pub fn merge(mut base: Value, extra: Value) -> Value {
    if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
        base.extend(extra);
    }
    base
}

pub fn catalog_entry_json() -> Value {
    let listing = json!({
        "id": "offer-1",
        "title": "Save the World",
        "description": "Founder's pack",
        "longDescription": "",
        "keyImages": [{
            "type": "Thumbnail",
            "url": "https://cdn/thumb.png",
            "md5": "abc",
            "width": 100,
            "height": 100,
            "size": 2048,
            "uploadedDate": "2024-01-01T00:00:00.000Z"
        }],
        "categories": [{"path": "freegames"}],
        "namespace": "fn",
        "status": "ACTIVE",
        "creationDate": "2024-01-01T00:00:00.000Z",
        "lastModifiedDate": "2024-01-02T00:00:00.000Z",
        "customAttributes": {},
        "internalName": "stw",
        "recurrence": "ONCE",
        "items": [{
            "id": "item-1",
            "categories": [],
            "namespace": "fn",
            "unsearchable": false
        }]
    });
    let price = json!({
        "currencyCode": "USD",
        "currentPrice": 1999,
        "price": 1999,
        "basePrice": 1999,
        "basePriceCurrencyCode": "USD",
        "recurringPrice": 0,
        "freeDays": 0,
        "maxBillingCycles": 0
    });
    let terms = json!({
        "seller": {"id": "seller", "name": "Epic Games"},
        "effectiveDate": "2024-01-01T00:00:00.000Z",
        "vatIncluded": false,
        "isCodeRedemptionOnly": false,
        "isFeatured": false,
        "taxSkuId": "FN_Currency",
        "merchantGroup": "FN_MKT",
        "priceTier": "tier",
        "urlSlug": "stw",
        "roleNamesToGrant": [],
        "tags": [],
        "purchaseLimit": -1,
        "ignoreOrder": false,
        "fulfillToGroup": false,
        "fraudItemType": "Digital",
        "shareRevenue": false,
        "unsearchable": false,
        "releaseOffer": "",
        "title4Sort": "Save the World",
        "selfRefundable": false,
        "refundType": "NON_REFUNDABLE"
    });
    let purchase = json!({
        "priceCalculationMode": "FIXED",
        "assembleMode": "SINGLE",
        "currencyDecimals": 2,
        "allowPurchaseForPartialOwned": true,
        "shareRevenueWithUnderageAffiliates": false,
        "platformWhitelist": [],
        "platformBlacklist": [],
        "partialItemPrerequisiteCheck": false,
        "upgradeMode": "UPGRADED_WITH_PRICE_FULL"
    });

    [price, terms, purchase].into_iter().fold(listing, merge)
}

pub fn island_json() -> Value {
    json!({
        "namespace": "fn",
        "accountId": "creator-account",
        "creatorName": "epic",
        "mnemonic": "1111-1111-1111",
        "linkType": "valkyrie:application",
        "metadata": {
            "title": "Box Fights",
            "locale": "en",
            "image_url": "https://cdn/island.png",
            "image_urls": {"url_m": "m.png", "url_s": "s.png"},
            "matchmaking": {"playerCount": 16, "playlists": ["Playlist_Creative"]},
            "ratings": {
                "rating_received_time": "2024-04-01T00:00:00.000Z",
                "boards": {
                    "ESRB": {
                        "descriptors": ["Fantasy Violence"],
                        "rating_overridden": true,
                        "rating": "ESRB_AGE_T",
                        "initial_rating": "ESRB_AGE_E10",
                        "interactive_elements": []
                    },
                    "PEGI": {
                        "descriptors": [],
                        "rating": "PEGI_AGE_12",
                        "initial_rating": "PEGI_AGE_12",
                        "interactive_elements": []
                    }
                }
            },
            "dynamicXp": {"uniqueGameVersion": "5", "calibrationPhase": "LiveXp"},
            "attributions": [{"license": "CC-BY", "author": "someone", "title": "Tree"}]
        },
        "version": 3,
        "active": true,
        "disabled": false,
        "created": "2024-01-01T00:00:00.000Z",
        "published": "2024-01-02T00:00:00.000Z",
        "descriptionTags": ["1v1", "boxfight"],
        "moderationStatus": "Approved",
        "lastActivatedDate": "",
        "discoveryIntent": "PUBLIC"
    })
}

pub fn discovery_v2_json() -> Value {
    json!({
        "testVariantName": "Baseline",
        "testName": "discover-v2",
        "testAnalyticsId": "t-1",
        "testVariantAnalyticsId": "v-1",
        "panels": [{
            "panelName": "Homebar",
            "panelDisplayName": "Popular",
            "featureTags": ["col:6"],
            "firstPage": {
                "results": [{
                    "linkCode": "1111-1111-1111",
                    "isFavorite": false,
                    "globalCCU": 1200,
                    "lockStatus": "UNLOCKED",
                    "lockStatusReason": "NONE",
                    "isVisible": true
                }],
                "hasMore": true,
                "panelTargetName": null
            },
            "panelType": "AnalyticsList",
            "playHistoryType": "RecentlyPlayed"
        }]
    })
}

pub fn profile_item(template_id: &str, attributes: Value, quantity: i64) -> Value {
    json!({"templateId": template_id, "attributes": attributes, "quantity": quantity})
}

pub fn locker_attributes() -> Value {
    let slot = |name: &str| json!({"locker_slot_name": name, "useCount": 0, "item": null});
    json!({
        "locker_slots_data": {"slots": {
            "Character": slot("Character"),
            "Backpack": slot("Backpack"),
            "Pickaxe": slot("Pickaxe"),
            "Glider": slot("Glider"),
            "SkyDiveContrail": slot("SkyDiveContrail"),
            "Dance": slot("Dance"),
            "MusicPack": slot("MusicPack"),
            "ItemWrap": slot("ItemWrap"),
            "LoadingScreen": slot("LoadingScreen")
        }},
        "locker_name": "Default",
        "banner_icon_template": "StandardBanner1",
        "useCount": 4
    })
}

pub fn battle_royale_profile_json() -> Value {
    json!({
        "items": {
            "guid-1": profile_item("AthenaCharacter:cid_028_athena_commando_f", json!({}), 1),
            "guid-2": profile_item("AthenaCharacter:cid_029_athena_commando_f", json!({}), 1),
            "guid-3": profile_item("AthenaPickaxe:pickaxe_id_011", json!({}), 1),
            "guid-4": profile_item("Accolades:accoladeid_001", json!({}), 1),
            "guid-5": profile_item("CosmeticLocker:cosmeticlocker_athena", locker_attributes(), 1),
            "guid-6": profile_item("Quest:quest_daily", json!({}), 1)
        },
        "stats": {"attributes": {
            "accountLevel": 120,
            "season_num": 29,
            "level": 55,
            "season": {"numWins": 3},
            "last_match_end_datetime": "2024-05-01T10:00:00.000Z",
            "battlestars_season_total": 200,
            "lifetime_wins": 42,
            "past_seasons": [{
                "seasonNumber": 28,
                "numWins": 5,
                "seasonXp": 1000,
                "seasonLevel": 100,
                "purchasedVIP": true,
                "numRoyalRoyales": 1
            }],
            "loadouts": ["loadout-1"],
            "mfa_reward_claimed": true,
            "xp": 5000,
            "last_xp_interaction": "2024-05-01T09:00:00.000Z",
            "rested_xp_mult": 1.5,
            "rested_xp_overflow": 0,
            "rested_xp_exchange": 0.333,
            "book_level": 55,
            "purchased_bp_offers": [{
                "offerId": "bp-offer",
                "bIsFreePassReward": false,
                "purchaseDate": "2024-03-01T00:00:00.000Z",
                "lootResult": [{
                    "itemType": "AthenaCharacter:cid_a_001",
                    "itemGuid": "AthenaCharacter:cid_a_001",
                    "itemProfile": "athena",
                    "quantity": 1
                }],
                "currencyType": "MtxCurrency",
                "totalCurrencyPaid": 950
            }]
        }}
    })
}

pub fn common_core_profile_json() -> Value {
    json!({
        "items": {
            "c1": profile_item("Currency:MtxPurchased", json!({"platform": "EpicPC"}), 1000),
            "c2": profile_item("Currency:MtxPurchased", json!({"platform": "Nintendo"}), 500),
            "c3": profile_item("Currency:MtxComplimentary", json!({}), 300),
            "c4": profile_item("Currency:MtxGiveaway", json!({}), 100),
            "b1": profile_item("HomebaseBannerIcon:standardbanner1", json!({}), 1),
            "b2": profile_item("HomebaseBannerColor:defaultcolor1", json!({}), 1),
            "t1": profile_item("Token:athenacancreatecustomgames_token", json!({}), 1)
        },
        "stats": {"attributes": {
            "survey_data": {},
            "intro_game_played": true,
            "mtx_purchase_history": {
                "refundsUsed": 0,
                "refundCredits": 3,
                "tokenRefreshReferenceTime": "2024-01-01T00:00:00.000Z",
                "purchases": [{
                    "purchaseId": "p-1",
                    "offerId": "v2:/offer",
                    "purchaseDate": "2024-02-01T00:00:00.000Z",
                    "freeRefundEligible": false,
                    "fulfillments": [],
                    "lootResult": [{
                        "itemType": "AthenaDance:eid_floss",
                        "itemGuid": "AthenaDance:eid_floss",
                        "itemProfile": "athena",
                        "quantity": 1
                    }],
                    "totalMtxPaid": 500,
                    "metadata": {"mtx_affiliate": "creator"},
                    "gameContext": ""
                }]
            },
            "rmt_purchase_history": null,
            "gift_history": {
                "num_sent": 0,
                "num_received": 1,
                "sentTo": {},
                "receivedFrom": {"friend": "2024-03-01T00:00:00.000Z"},
                "gifts": []
            },
            "undo_cooldowns": [{"offerId": "v2:/offer", "cooldownExpires": "2024-02-02T00:00:00.000Z"}],
            "mtx_affiliate": "creator",
            "mtx_affiliate_set_time": "2024-01-15T00:00:00.000Z",
            "current_mtx_platform": "EpicPC",
            "in_app_purchases": {},
            "allowed_to_send_gifts": true,
            "allowed_to_receive_gifts": true,
            "mfa_enabled": true
        }}
    })
}

pub fn lego_world_json(constraint: &str, metadata: Value) -> Value {
    json!({
        "namespaceId": "juno",
        "worldId": "world-1",
        "ownerAccountId": "owner",
        "version": 1,
        "currentVersion": 1,
        "name": "Home",
        "createdAt": "2024-05-01T10:00:00.000Z",
        "updatedAt": "2024-05-01T11:00:00.000Z",
        "sanction": {},
        "session": {},
        "metadataConstraint": constraint,
        "metadata": metadata
    })
}

pub fn lego_grant_json(role: &str) -> Value {
    json!({
        "namespaceId": "juno",
        "worldId": "world-1",
        "accountId": "player",
        "roleId": role,
        "type": "PERSISTENT",
        "grantedBy": "owner",
        "grantedAt": "2024-05-01T10:00:00.000Z",
        "expiresAt": "2024-06-01T10:00:00.000Z"
    })
}

pub fn accessible_lego_world_json() -> Value {
    json!({
        "world": lego_world_json(
            "juno_default",
            json!({"mode": "Cozy", "difficulty": "Easy", "death": "On", "hunger": "Off"}),
        ),
        "grants": [lego_grant_json("world_owner"), lego_grant_json("juno_keyholder")],
        "session": {
            "namespaceId": "juno",
            "worldId": "world-1",
            "owningSessionId": "session-1",
            "sessionKey": "key",
            "currentPlayers": ["owner"],
            "sessionCreatedAt": "2024-05-01T10:00:00.000Z",
            "lastServerHeartbeat": null,
            "totalSecondsPlayed": 3600
        }
    })
}

pub fn sac_earnings_json() -> Value {
    json!({
        "lifetimePayouts": 150.25,
        "lifetimePayoutCurrency": "USD",
        "lastPayout": 20,
        "lastPayoutCurrency": "USD",
        "lastPayoutDate": "2024-04-30T00:00:00.000Z",
        "eligibleEarnings": 5.5,
        "eligibleEarningsCurrency": "USD"
    })
}

pub fn code_redemption_json() -> Value {
    json!({
        "offerId": "offer",
        "accountId": "account",
        "identityId": "identity",
        "details": [{
            "entitlementId": "ent-1",
            "entitlementName": "Fortnite_Founder",
            "itemId": "item-1",
            "namespace": "fn",
            "country": "US"
        }]
    })
}

pub fn code_json() -> Value {
    json!({
        "code": "ABCD-EFGH-IJKL",
        "namespace": "fn",
        "creator": "system",
        "dateCreated": "2024-01-01T00:00:00.000Z",
        "startDate": "2024-01-01T00:00:00.000Z",
        "endDate": "2025-01-01T00:00:00.000Z",
        "allowedUsers": [],
        "allowedCountries": [],
        "allowedClients": [],
        "distributionMetadata": {},
        "allowedDistributionClients": [],
        "codeType": "DIGITAL",
        "maxNumberOfUses": 3,
        "allowRepeatedUsesBySameUser": false,
        "useCount": 1,
        "completedCount": 1,
        "consumptionMetadata": {
            "criteria": {
                "checks": [{"data": "fn", "type": "OWNS_OFFER"}],
                "elseAction": "REJECT",
                "rejectErrorType": "ALREADY_OWNED",
                "action": "ACCEPT",
                "operator": "AND"
            },
            "namespace": "fn",
            "offerId": "offer"
        },
        "codeStatus": "ACTIVE",
        "batchId": "batch",
        "batchNumber": 7,
        "labels": ["promo"],
        "blockedCountries": []
    })
}

pub fn sac_products_json() -> Value {
    let product = |title: &str, referrals: i64| {
        json!({
            "title": title,
            "icon": "https://cdn/icon.png",
            "link": "https://store/product",
            "shareRate": 5,
            "urlSlug": "slug",
            "pageSlug": "page",
            "data": [{"date": "2024-05-01", "referrals": referrals, "avgShareRate": 5, "currency": "USD"}],
            "totalUniqueSupporters": referrals,
            "totalEstimatedEarnings": 1.25
        })
    };
    json!({"fortnite": product("Fortnite", 3), "fall-guys": product("Fall Guys", 1)})
}

pub fn web_shop_item_json(offer_id: &str, new_until: Value) -> Value {
    json!({
        "assetType": "staticImage",
        "hasVariants": false,
        "hasTags": false,
        "offerId": offer_id,
        "image": {"sm": "s.png", "md": "m.png", "lg": "l.png", "tall": "t.png", "wide": "w.png"},
        "title": "Jam Track",
        "englishTitle": "Jam Track",
        "urlName": "jam-track",
        "callout": {"text": "", "intensity": ""},
        "size": {"rows": 1, "columns": 1},
        "layoutId": "jam.1",
        "pricing": {"finalPrice": 500, "basePrice": 500, "amountOff": 0, "currencyType": "MtxCurrency"},
        "ownershipCalculationData": {
            "itemGrantTemplateIds": ["SparksSong:sid_placeholder_01"],
            "dynamicBundlePricingData": {
                "itemGrantTemplateIds": ["SparksSong:sid_placeholder_01"],
                "floorPrice": 400,
                "discountedBasePrice": 500,
                "currencyType": "MtxCurrency",
                "bundleItems": [{
                    "regularPrice": 500,
                    "alreadyOwnedPriceReduction": 100,
                    "item": {"templateId": "SparksSong:sid_placeholder_01"}
                }]
            }
        },
        "inDate": 1714521600,
        "outDate": 1714608000,
        "newUntil": new_until
    })
}

pub fn web_shop_json() -> Value {
    json!({"categories": [{
        "navLabel": "Featured",
        "sections": [{
            "sectionID": "jam-tracks",
            "stackRank": 1,
            "displayName": "Jam Tracks",
            "sectionId": "jam-tracks",
            "categoryName": "Music",
            "offerGroups": [{
                "offerGroupId": "group-1",
                "displayType": "grid",
                "items": [
                    web_shop_item_json("v2:/jam-1", json!(1714564800)),
                    web_shop_item_json("v2:/jam-2", json!(0))
                ]
            }]
        }]
    }]})
}
