// Raw payload of the random-person API (`GET /api/?...`).
use serde::Deserialize;

use super::user_record::{Gender, Location, PersonName, UserRecord};

#[derive(Debug, Deserialize)]
pub struct RandomUserResponse {
    pub results: Vec<RandomUserRaw>,
    pub info: Option<RandomUserInfo>,
}

#[derive(Debug, Deserialize)]
pub struct RandomUserInfo {
    pub seed: Option<String>,
    pub results: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RandomUserRaw {
    pub gender: Option<Gender>,
    pub name: Option<RawName>,
    pub location: Option<RawLocation>,
    pub email: Option<String>,
    pub login: RawLogin,
    pub dob: Option<RawDob>,
    pub picture: Option<RawPicture>,
}

#[derive(Debug, Deserialize)]
pub struct RawName {
    pub first: Option<String>,
    pub last: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLocation {
    pub city: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLogin {
    pub uuid: String,
}

#[derive(Debug, Deserialize)]
pub struct RawDob {
    pub age: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RawPicture {
    pub large: Option<String>,
    pub medium: Option<String>,
}

impl From<RandomUserRaw> for UserRecord {
    fn from(raw: RandomUserRaw) -> Self {
        let (first, last) = raw
            .name
            .map(|n| (n.first.unwrap_or_default(), n.last.unwrap_or_default()))
            .unwrap_or_default();
        let (city, country) = raw
            .location
            .map(|l| (l.city.unwrap_or_default(), l.country.unwrap_or_default()))
            .unwrap_or_default();
        let picture_url = raw
            .picture
            .and_then(|p| p.large.or(p.medium))
            .unwrap_or_default();

        UserRecord {
            id: raw.login.uuid,
            name: PersonName { first, last },
            gender: raw.gender.unwrap_or(Gender::Unspecified),
            age: raw.dob.and_then(|d| d.age),
            email: raw.email.unwrap_or_default(),
            location: Location { city, country },
            picture_url,
        }
    }
}

impl RandomUserResponse {
    pub fn into_records(self) -> Vec<UserRecord> {
        self.results.into_iter().map(UserRecord::from).collect()
    }
}
