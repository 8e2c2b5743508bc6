use sea_orm_migration::prelude::*;

/// Column names follow the external RADIUS/billing schema the portal was built against.
#[derive(DeriveIden)]
enum AuthTable {
    #[sea_orm(iden = "AuthTable")]
    Table,
    Id,
    #[sea_orm(iden = "userlogin")]
    UserLogin,
    #[sea_orm(iden = "timebanking")]
    TimeBanking,
    #[sea_orm(iden = "FreeTime")]
    FreeTime,
    #[sea_orm(iden = "endofsubscription")]
    EndOfSubscription,
    Password,
    #[sea_orm(iden = "framedip")]
    FramedIp,
    #[sea_orm(iden = "loginlimit")]
    LoginLimit,
    #[sea_orm(iden = "blnRoaming")]
    Roaming,
    Status,
    #[sea_orm(iden = "olddomain")]
    OldDomain,
    #[sea_orm(iden = "newdomain")]
    NewDomain,
    #[sea_orm(iden = "calledstationid")]
    CalledStationId,
    #[sea_orm(iden = "poolhint")]
    PoolHint,
    #[sea_orm(iden = "typeid")]
    TypeId,
    Speed,
    Package,
    Username,
    #[sea_orm(iden = "usertelephone")]
    UserTelephone,
    #[sea_orm(iden = "usernationality")]
    UserNationality,
    #[sea_orm(iden = "idnumber")]
    IdNumber,
    #[sea_orm(iden = "idtype")]
    IdType,
    Mobile,
    Email,
    #[sea_orm(iden = "accounttype")]
    AccountType,
}

#[derive(DeriveIden)]
enum InactivePrepaid {
    #[sea_orm(iden = "InactivePrepaid")]
    Table,
    Id,
    Code,
    #[sea_orm(iden = "type")]
    CardType,
    #[sea_orm(iden = "accounttype")]
    AccountType,
    Hours,
    #[sea_orm(iden = "generationdate")]
    GenerationDate,
    #[sea_orm(iden = "usagedate")]
    UsageDate,
    #[sea_orm(iden = "userlogin")]
    UserLogin,
    Dealer,
    #[sea_orm(iden = "selldate")]
    SellDate,
    #[sea_orm(iden = "sellprice")]
    SellPrice,
    #[sea_orm(iden = "tracknumber")]
    TrackNumber,
    #[sea_orm(iden = "markdel")]
    MarkDel,
    #[sea_orm(iden = "promoid")]
    PromoId,
    #[sea_orm(iden = "promocollected")]
    PromoCollected,
    #[sea_orm(iden = "cardpromodays")]
    CardPromoDays,
    #[sea_orm(iden = "overactive")]
    OverActive,
    #[sea_orm(iden = "transferreddays")]
    TransferredDays,
    #[sea_orm(iden = "typeid")]
    TypeId,
    Speed,
    Package,
}

/// Shared by `NullSpeedRegularUsers` and `NullSpeedUnusedCafeCards`; only the table name differs.
#[derive(DeriveIden, Clone, Copy)]
enum NullSpeed {
    #[sea_orm(iden = "NullSpeedRegularUsers")]
    RegularUsers,
    #[sea_orm(iden = "NullSpeedUnusedCafeCards")]
    UnusedCafeCards,
    Id,
    #[sea_orm(iden = "userlogin")]
    UserLogin,
    #[sea_orm(iden = "timebanking")]
    TimeBanking,
    #[sea_orm(iden = "FreeTime")]
    FreeTime,
    #[sea_orm(iden = "endofsubscription")]
    EndOfSubscription,
    Password,
    #[sea_orm(iden = "framedip")]
    FramedIp,
    #[sea_orm(iden = "loginlimit")]
    LoginLimit,
    #[sea_orm(iden = "blnRoaming")]
    Roaming,
    Status,
    #[sea_orm(iden = "olddomain")]
    OldDomain,
    #[sea_orm(iden = "newdomain")]
    NewDomain,
    #[sea_orm(iden = "calledstationid")]
    CalledStationId,
    #[sea_orm(iden = "poolhint")]
    PoolHint,
    #[sea_orm(iden = "typeid")]
    TypeId,
    Speed,
    Package,
    Username,
    #[sea_orm(iden = "usertelephone")]
    UserTelephone,
    #[sea_orm(iden = "usernationality")]
    UserNationality,
    #[sea_orm(iden = "idnumber")]
    IdNumber,
    #[sea_orm(iden = "idtype")]
    IdType,
    Mobile,
    Email,
}

#[derive(DeriveIden)]
enum Packages {
    #[sea_orm(iden = "Packages")]
    Table,
    #[sea_orm(iden = "TypeID")]
    TypeId,
    #[sea_orm(iden = "Type")]
    PackageType,
    #[sea_orm(iden = "HourlyRate")]
    HourlyRate,
    #[sea_orm(iden = "Sub_NoSub")]
    SubNoSub,
    #[sea_orm(iden = "SubscriptionFee")]
    SubscriptionFee,
    #[sea_orm(iden = "FreeHours")]
    FreeHours,
    #[sea_orm(iden = "Description")]
    Description,
    #[sea_orm(iden = "countlogin")]
    CountLogin,
    #[sea_orm(iden = "billperiod")]
    BillPeriod,
    #[sea_orm(iden = "visible")]
    Visible,
    #[sea_orm(iden = "AutoRenewable")]
    AutoRenewable,
    #[sea_orm(iden = "timebanking")]
    TimeBanking,
    #[sea_orm(iden = "Promotion")]
    Promotion,
    #[sea_orm(iden = "Unlimited")]
    Unlimited,
    #[sea_orm(iden = "OnlinePay")]
    OnlinePay,
    #[sea_orm(iden = "SMSCredits")]
    SmsCredits,
    #[sea_orm(iden = "OnlineSubscriptionFee")]
    OnlineSubscriptionFee,
    #[sea_orm(iden = "ReferrerDays")]
    ReferrerDays,
    #[sea_orm(iden = "ReferrerHours")]
    ReferrerHours,
    #[sea_orm(iden = "Dealers")]
    Dealers,
    #[sea_orm(iden = "FreeCourses")]
    FreeCourses,
    #[sea_orm(iden = "DiscountCourses")]
    DiscountCourses,
    #[sea_orm(iden = "Promotime")]
    PromoTime,
    #[sea_orm(iden = "Promodays")]
    PromoDays,
    #[sea_orm(iden = "HasEmail")]
    HasEmail,
    #[sea_orm(iden = "GroupId")]
    GroupId,
    #[sea_orm(iden = "RoamingFreeHours")]
    RoamingFreeHours,
    #[sea_orm(iden = "Speed")]
    Speed,
    #[sea_orm(iden = "Price")]
    Price,
    #[sea_orm(iden = "DayPrice")]
    DayPrice,
    #[sea_orm(iden = "UserType")]
    UserType,
    #[sea_orm(iden = "HostingPlanID")]
    HostingPlanId,
    #[sea_orm(iden = "GmailUsers")]
    GmailUsers,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn text_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string_len(40).null().to_owned()
}

fn login_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .string_len(40)
        .not_null()
        .unique_key()
        .to_owned()
}

fn null_speed_table(table: NullSpeed) -> TableCreateStatement {
    let mut stmt = Table::create();
    stmt.table(table)
        .if_not_exists()
        .col(&mut id_col(NullSpeed::Id))
        .col(&mut login_col(NullSpeed::UserLogin));
    for col in [
        NullSpeed::TimeBanking,
        NullSpeed::FreeTime,
        NullSpeed::EndOfSubscription,
        NullSpeed::Password,
        NullSpeed::FramedIp,
        NullSpeed::LoginLimit,
        NullSpeed::Roaming,
        NullSpeed::Status,
        NullSpeed::OldDomain,
        NullSpeed::NewDomain,
        NullSpeed::CalledStationId,
        NullSpeed::PoolHint,
        NullSpeed::TypeId,
        NullSpeed::Speed,
        NullSpeed::Package,
        NullSpeed::Username,
        NullSpeed::UserTelephone,
        NullSpeed::UserNationality,
        NullSpeed::IdNumber,
        NullSpeed::IdType,
        NullSpeed::Mobile,
        NullSpeed::Email,
    ] {
        stmt.col(&mut text_col(col));
    }
    stmt.to_owned()
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut auth_table = Table::create();
        auth_table
            .table(AuthTable::Table)
            .if_not_exists()
            .col(&mut id_col(AuthTable::Id))
            .col(&mut login_col(AuthTable::UserLogin))
            .col(
                ColumnDef::new(AuthTable::EndOfSubscription)
                    .timestamp_with_time_zone()
                    .null(),
            )
            .col(ColumnDef::new(AuthTable::Status).integer().null())
            .col(ColumnDef::new(AuthTable::AccountType).string_len(40).null());
        for col in [
            AuthTable::TimeBanking,
            AuthTable::FreeTime,
            AuthTable::Password,
            AuthTable::FramedIp,
            AuthTable::LoginLimit,
            AuthTable::Roaming,
            AuthTable::OldDomain,
            AuthTable::NewDomain,
            AuthTable::CalledStationId,
            AuthTable::PoolHint,
            AuthTable::TypeId,
            AuthTable::Speed,
            AuthTable::Package,
            AuthTable::Username,
            AuthTable::UserTelephone,
            AuthTable::UserNationality,
            AuthTable::IdNumber,
            AuthTable::IdType,
            AuthTable::Mobile,
            AuthTable::Email,
        ] {
            auth_table.col(&mut text_col(col));
        }
        manager.create_table(auth_table.to_owned()).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_auth_table_username")
                    .table(AuthTable::Table)
                    .col(AuthTable::Username)
                    .to_owned(),
            )
            .await?;

        let mut prepaid = Table::create();
        prepaid
            .table(InactivePrepaid::Table)
            .if_not_exists()
            .col(&mut id_col(InactivePrepaid::Id));
        for col in [
            InactivePrepaid::Code,
            InactivePrepaid::CardType,
            InactivePrepaid::AccountType,
            InactivePrepaid::Hours,
            InactivePrepaid::GenerationDate,
            InactivePrepaid::UsageDate,
            InactivePrepaid::UserLogin,
            InactivePrepaid::Dealer,
            InactivePrepaid::SellDate,
            InactivePrepaid::SellPrice,
            InactivePrepaid::TrackNumber,
            InactivePrepaid::MarkDel,
            InactivePrepaid::PromoId,
            InactivePrepaid::PromoCollected,
            InactivePrepaid::CardPromoDays,
            InactivePrepaid::OverActive,
            InactivePrepaid::TransferredDays,
            InactivePrepaid::TypeId,
            InactivePrepaid::Speed,
            InactivePrepaid::Package,
        ] {
            prepaid.col(&mut text_col(col));
        }
        manager.create_table(prepaid.to_owned()).await?;

        manager
            .create_table(null_speed_table(NullSpeed::RegularUsers))
            .await?;
        manager
            .create_table(null_speed_table(NullSpeed::UnusedCafeCards))
            .await?;

        let mut packages = Table::create();
        packages
            .table(Packages::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Packages::TypeId)
                    .string_len(40)
                    .not_null()
                    .primary_key(),
            )
            .col(ColumnDef::new(Packages::BillPeriod).integer().null());
        for col in [
            Packages::PackageType,
            Packages::HourlyRate,
            Packages::SubNoSub,
            Packages::SubscriptionFee,
            Packages::FreeHours,
            Packages::Description,
            Packages::CountLogin,
            Packages::Visible,
            Packages::AutoRenewable,
            Packages::TimeBanking,
            Packages::Promotion,
            Packages::Unlimited,
            Packages::OnlinePay,
            Packages::SmsCredits,
            Packages::OnlineSubscriptionFee,
            Packages::ReferrerDays,
            Packages::ReferrerHours,
            Packages::Dealers,
            Packages::FreeCourses,
            Packages::DiscountCourses,
            Packages::PromoTime,
            Packages::PromoDays,
            Packages::HasEmail,
            Packages::GroupId,
            Packages::RoamingFreeHours,
            Packages::Speed,
            Packages::Price,
            Packages::DayPrice,
            Packages::UserType,
            Packages::HostingPlanId,
            Packages::GmailUsers,
        ] {
            packages.col(&mut text_col(col));
        }
        manager.create_table(packages.to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Packages::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(NullSpeed::UnusedCafeCards)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(NullSpeed::RegularUsers)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(InactivePrepaid::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(AuthTable::Table).to_owned())
            .await?;
        Ok(())
    }
}
