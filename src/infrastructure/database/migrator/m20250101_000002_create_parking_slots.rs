//! Create parking_slots table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingSlots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingSlots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::SlotNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::Floor)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::Type)
                            .string()
                            .not_null()
                            .default("standard"),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::Status)
                            .string()
                            .not_null()
                            .default("available"),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingSlots::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_slots_status")
                    .table(ParkingSlots::Table)
                    .col(ParkingSlots::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingSlots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ParkingSlots {
    Table,
    Id,
    SlotNumber,
    Floor,
    Type,
    Status,
    CreatedAt,
    UpdatedAt,
}
