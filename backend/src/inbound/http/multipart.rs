//! Multipart form collector for listing submissions.
//!
//! Text parts fill a [`HousePayload`]; every `images` file part becomes an
//! [`ImageUpload`] handed to the image host in submission order.

use actix_multipart::{Field, Multipart};
use futures_util::StreamExt;
use serde_json::json;

use crate::domain::Error;
use crate::domain::ports::ImageUpload;
use crate::inbound::http::houses::HousePayload;

/// Largest accepted file part.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Form field name carrying image files.
const IMAGES_FIELD: &str = "images";

fn malformed(error: impl std::fmt::Display) -> Error {
    Error::invalid_request(format!("malformed multipart payload: {error}"))
}

fn not_a_number(field: &str) -> Error {
    Error::invalid_request(format!("{field} must be a number"))
        .with_details(json!({ "field": field }))
}

async fn read_part_bytes(field: &mut Field, limit: usize) -> Result<Vec<u8>, Error> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(malformed)?;
        if data.len() + chunk.len() > limit {
            return Err(Error::invalid_request("multipart part too large"));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_part_text(field: &mut Field) -> Result<String, Error> {
    let bytes = read_part_bytes(field, 64 * 1024).await?;
    String::from_utf8(bytes).map_err(|_| malformed("text field is not valid UTF-8"))
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<Option<T>, Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| not_a_number(field))
}

fn text_or_none(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn assign_text_field(payload: &mut HousePayload, name: &str, value: String) -> Result<(), Error> {
    match name {
        "zpid" => payload.zpid = parse_number(name, &value)?,
        "streetAddress" => payload.street_address = text_or_none(value),
        "city" => payload.city = text_or_none(value),
        "state" => payload.state = text_or_none(value),
        "zipcode" => payload.zipcode = text_or_none(value),
        "neighborhood" => payload.neighborhood = text_or_none(value),
        "community" => payload.community = text_or_none(value),
        "subdivision" => payload.subdivision = text_or_none(value),
        "bedrooms" => payload.bedrooms = parse_number(name, &value)?,
        "bathrooms" => payload.bathrooms = parse_number(name, &value)?,
        "price" => payload.price = parse_number(name, &value)?,
        "yearBuilt" => payload.year_built = parse_number(name, &value)?,
        "livingArea" => payload.living_area = parse_number(name, &value)?,
        "longitude" => payload.longitude = parse_number(name, &value)?,
        "latitude" => payload.latitude = parse_number(name, &value)?,
        "status" => payload.status = text_or_none(value),
        "homeStatus" => payload.home_status = text_or_none(value),
        "homeType" => payload.home_type = text_or_none(value),
        "description" => payload.description = text_or_none(value),
        "currency" => payload.currency = text_or_none(value),
        "datePosted" => payload.date_posted = text_or_none(value),
        // Unknown text fields are ignored, matching lenient form clients.
        _ => {}
    }
    Ok(())
}

/// Drain a multipart stream into listing fields and image uploads.
pub(crate) async fn collect_house_submission(
    mut multipart: Multipart,
) -> Result<(HousePayload, Vec<ImageUpload>), Error> {
    let mut payload = HousePayload::default();
    let mut images = Vec::new();

    while let Some(entry) = multipart.next().await {
        let mut field = entry.map_err(malformed)?;
        let (name, file_name) = {
            let disposition = field.content_disposition();
            (
                disposition
                    .and_then(|d| d.get_name())
                    .map(str::to_owned)
                    .unwrap_or_default(),
                disposition.and_then(|d| d.get_filename()).map(str::to_owned),
            )
        };

        if name == IMAGES_FIELD {
            let content_type = field
                .content_type()
                .map(ToString::to_string)
                .unwrap_or_else(|| "application/octet-stream".to_owned());
            let bytes = read_part_bytes(&mut field, MAX_IMAGE_BYTES).await?;
            images.push(ImageUpload {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = read_part_text(&mut field).await?;
            assign_text_field(&mut payload, &name, value)?;
        }
    }

    Ok((payload, images))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_fields_parse_or_reject() {
        let mut payload = HousePayload::default();
        assign_text_field(&mut payload, "price", "650000.5".to_owned()).expect("valid price");
        assert_eq!(payload.price, Some(650_000.5));
        assign_text_field(&mut payload, "bedrooms", "4".to_owned()).expect("valid bedrooms");
        assert_eq!(payload.bedrooms, Some(4));
        let error =
            assign_text_field(&mut payload, "yearBuilt", "recent".to_owned()).expect_err("reject");
        assert_eq!(error.message(), "yearBuilt must be a number");
    }

    #[test]
    fn blank_text_fields_stay_unset() {
        let mut payload = HousePayload::default();
        assign_text_field(&mut payload, "city", "   ".to_owned()).expect("blank ok");
        assert_eq!(payload.city, None);
        assign_text_field(&mut payload, "city", " Dallas ".to_owned()).expect("value ok");
        assert_eq!(payload.city.as_deref(), Some("Dallas"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut payload = HousePayload::default();
        assign_text_field(&mut payload, "csrfToken", "abc".to_owned()).expect("ignored");
        assert_eq!(payload, HousePayload::default());
    }

    #[test]
    fn status_alias_is_collected() {
        let mut payload = HousePayload::default();
        assign_text_field(&mut payload, "homeStatus", "FOR_RENT".to_owned()).expect("ok");
        assert_eq!(payload.home_status.as_deref(), Some("FOR_RENT"));
    }
}
